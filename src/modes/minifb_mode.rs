use minifb::{Key, MouseMode, Window, WindowOptions};

use std::time::Instant;

use crate::{
    data::{Program, FRAME_DELAY},
    error::BackendError,
    graphics::P2,
};

pub fn minifb_main(mut prog: Program) -> Result<Program, BackendError> {
    let (w, h) = prog.pix.sizeu();

    let mut win = Window::new(
        prog.title(),
        w,
        h,
        WindowOptions {
            resize: false,
            ..WindowOptions::default()
        },
    )
    .map_err(|e| BackendError::Minifb(e.to_string()))?;

    let mut buffer = vec![0u32; w * h];
    let mut cursor = None;

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let started = Instant::now();

        if let Some((x, y)) = win.get_mouse_pos(MouseMode::Discard) {
            cursor = Some(P2(x.floor() as i32, y.floor() as i32));
        }

        prog.frame(cursor, started);
        prog.pix.present_to(&mut buffer, w);

        if let Err(e) = win.update_with_buffer(&buffer, w, h) {
            log::warn!("Failed to present frame: {e}");
        }

        prog.record_frame(started.elapsed());

        std::thread::sleep(FRAME_DELAY);
    }

    Ok(prog)
}
