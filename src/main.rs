mod data;
mod error;
mod graphics;
mod math;
mod modes;
mod scene;

use std::time::Instant;

use data::{config::Config, reader::USAGE, Program};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let config = match Config::default().eval_args(&mut args.iter()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Argument error: {e}");
            if e.wants_usage() {
                eprint!("\n{USAGE}");
            }
            std::process::exit(-1);
        }
    };

    if config.help {
        print!("{USAGE}");
        return;
    }

    let prog = match Program::new(&config, Instant::now()) {
        Ok(prog) => prog,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(-1);
        }
    };

    prog.print_startup_info();

    let mode = prog.mode;

    let prog = match mode.run(prog) {
        Ok(prog) => prog,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(-1);
        }
    };

    if !prog.is_quiet() {
        println!("{}", prog.summary(Instant::now()));
    }
}
