use super::config::Config;
use crate::{error::ArgError, scene::Variant};

pub const USAGE: &str = "\
Usage: bubblesaver [OPTIONS] <COUNT>

Arguments:
  <COUNT>             number of shapes to animate

Options:
  --kaleidoscope      spinning triangles instead of bubbles
  --parallel          decide bubble removal on all cores
  --no-fps            hide the frame rate label
  --seed <u64>        fixed random seed
  --size <W>x<H>      window size [default: 640x480]
  --quiet             do not print the run summary on exit
  --font <path>       TrueType font for the label (feature `ttf`)
  --minifb            use the minifb backend (feature `minifb`)
  -h, --help          print this message
";

fn parse_size(value: &str) -> Option<(u16, u16)> {
    let (w, h) = value.split_once('x')?;
    let w = w.trim().parse::<u16>().ok()?;
    let h = h.trim().parse::<u16>().ok()?;

    (w > 0 && h > 0).then_some((w, h))
}

impl Config {
    /// Reads the command line. The first item is the program name and is
    /// skipped.
    pub fn eval_args(mut self, args: &mut dyn Iterator<Item = &String>) -> Result<Self, ArgError> {
        args.next();

        let mut count = None;
        let mut kaleidoscope = false;
        let mut parallel = false;

        while let Some(arg) = args.next() {
            let arg = arg.as_str();

            match arg {
                "-h" | "--help" => {
                    self.help = true;
                    return Ok(self);
                }

                "--kaleidoscope" => kaleidoscope = true,

                "--parallel" => parallel = true,

                "--no-fps" => self.show_fps = false,

                "--quiet" => self.quiet = true,

                "--seed" => {
                    let value = args.next().ok_or(ArgError::MissingValue("--seed"))?;

                    self.seed = Some(value.parse::<u64>().map_err(|_| ArgError::InvalidValue {
                        option: "--seed",
                        value: value.clone(),
                    })?);
                }

                "--size" => {
                    let value = args.next().ok_or(ArgError::MissingValue("--size"))?;

                    self.size = parse_size(value).ok_or_else(|| ArgError::InvalidValue {
                        option: "--size",
                        value: value.clone(),
                    })?;
                }

                #[cfg(feature = "ttf")]
                "--font" => {
                    let value = args.next().ok_or(ArgError::MissingValue("--font"))?;
                    self.font = Some(value.into());
                }

                #[cfg(feature = "minifb")]
                "--minifb" => self.mode = crate::modes::Mode::WinLegacy,

                #[cfg(not(feature = "ttf"))]
                "--font" => {
                    return Err(ArgError::FeatureDisabled {
                        option: "--font",
                        feature: "ttf",
                    })
                }

                #[cfg(not(feature = "minifb"))]
                "--minifb" => {
                    return Err(ArgError::FeatureDisabled {
                        option: "--minifb",
                        feature: "minifb",
                    })
                }

                _ if arg.starts_with("--") => log::warn!("Unknown option {arg}, ignored"),

                _ if count.is_none() => {
                    count = Some(
                        arg.parse::<i64>()
                            .map_err(|_| ArgError::InvalidCount(arg.to_string()))?,
                    );
                }

                _ => log::warn!("Extra argument {arg}, ignored"),
            }
        }

        self.count = count.ok_or(ArgError::MissingCount)?;

        self.variant = match (kaleidoscope, parallel) {
            (true, _) => Variant::Kaleidoscope,
            (false, true) => Variant::ParallelBubbles,
            (false, false) => Variant::Bubbles,
        };

        if self.variant.requires_positive_count() && self.count <= 0 {
            return Err(ArgError::NonPositiveCount(self.count));
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

    fn parse(line: &[&str]) -> Result<Config, ArgError> {
        let args: Vec<String> = std::iter::once("bubblesaver")
            .chain(line.iter().copied())
            .map(String::from)
            .collect();

        Config::default().eval_args(&mut args.iter())
    }

    #[test]
    fn count_alone_runs_plain_bubbles() {
        let c = parse(&["25"]).unwrap();

        assert_eq!(c.count, 25);
        assert_eq!(c.variant, Variant::Bubbles);
        assert!(c.show_fps);
        assert!(!c.quiet);
        assert_eq!(c.seed, None);
        assert_eq!(c.size, (DEFAULT_WIDTH, DEFAULT_HEIGHT));
    }

    #[test]
    fn missing_count_is_an_error() {
        assert_eq!(parse(&[]), Err(ArgError::MissingCount));
        assert_eq!(parse(&["--parallel"]), Err(ArgError::MissingCount));
    }

    #[test]
    fn non_numeric_count_is_an_error() {
        assert_eq!(
            parse(&["lots"]),
            Err(ArgError::InvalidCount("lots".to_string()))
        );
    }

    #[test]
    fn kaleidoscope_refuses_non_positive_counts() {
        assert_eq!(
            parse(&["--kaleidoscope", "0"]),
            Err(ArgError::NonPositiveCount(0))
        );
        assert_eq!(
            parse(&["-3", "--kaleidoscope"]),
            Err(ArgError::NonPositiveCount(-3))
        );
    }

    #[test]
    fn bubbles_accept_non_positive_counts() {
        assert_eq!(parse(&["0"]).unwrap().count, 0);
        assert_eq!(parse(&["-4"]).unwrap().count, -4);
    }

    #[test]
    fn flags_and_values() {
        let c = parse(&[
            "--parallel", "--no-fps", "--quiet", "--seed", "42", "--size", "320x200", "10",
        ])
        .unwrap();

        assert_eq!(c.variant, Variant::ParallelBubbles);
        assert!(!c.show_fps);
        assert!(c.quiet);
        assert_eq!(c.seed, Some(42));
        assert_eq!(c.size, (320, 200));
        assert_eq!(c.count, 10);
    }

    #[test]
    fn kaleidoscope_wins_over_parallel() {
        let c = parse(&["--parallel", "--kaleidoscope", "3"]).unwrap();
        assert_eq!(c.variant, Variant::Kaleidoscope);
    }

    #[test]
    fn option_values_are_checked() {
        assert_eq!(parse(&["5", "--seed"]), Err(ArgError::MissingValue("--seed")));
        assert_eq!(
            parse(&["5", "--seed", "-1"]),
            Err(ArgError::InvalidValue {
                option: "--seed",
                value: "-1".to_string()
            })
        );

        for bad in ["640", "0x480", "640x", "axb"] {
            assert_eq!(
                parse(&["5", "--size", bad]),
                Err(ArgError::InvalidValue {
                    option: "--size",
                    value: bad.to_string()
                })
            );
        }
    }

    #[test]
    fn unknown_options_and_extra_arguments_are_ignored() {
        let c = parse(&["--sparkles", "7", "8"]).unwrap();
        assert_eq!(c.count, 7);
    }

    #[test]
    fn help_short_circuits() {
        assert!(parse(&["--help"]).unwrap().help);
        assert!(parse(&["-h", "--size", "nope"]).unwrap().help);
    }

    #[cfg(not(feature = "ttf"))]
    #[test]
    fn font_needs_its_feature() {
        assert_eq!(
            parse(&["5", "--font", "mono.ttf"]),
            Err(ArgError::FeatureDisabled {
                option: "--font",
                feature: "ttf"
            })
        );
    }

    #[test]
    fn unknown_option_does_not_eat_the_count() {
        let c = parse(&["--glitter", "--parallel", "12"]).unwrap();
        assert_eq!((c.count, c.variant), (12, Variant::ParallelBubbles));
    }

    #[cfg(not(feature = "minifb"))]
    #[test]
    fn minifb_needs_its_feature() {
        assert_eq!(
            parse(&["--minifb", "5"]),
            Err(ArgError::FeatureDisabled {
                option: "--minifb",
                feature: "minifb"
            })
        );
    }

    #[cfg(feature = "minifb")]
    #[test]
    fn minifb_selects_the_legacy_backend() {
        assert_eq!(
            parse(&["--minifb", "5"]).unwrap().mode,
            crate::modes::Mode::WinLegacy
        );
    }

    #[test]
    fn usage_lists_every_option() {
        for opt in [
            "--kaleidoscope", "--parallel", "--no-fps", "--seed", "--size", "--quiet", "--font",
            "--minifb", "--help",
        ] {
            assert!(USAGE.contains(opt), "{opt} missing from usage");
        }
    }
}
