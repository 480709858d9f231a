//! Welcome banner: figlet "HUB-SIM" shaded from purple to green, plus the
//! shared palette used by the other screens.

use crossterm::QueueableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Neon Purple (#bc13fe).
pub const NEON_PURPLE: (u8, u8, u8) = (0xbc, 0x13, 0xfe);
/// Cyber Green (#0ff0fc).
pub const CYBER_GREEN: (u8, u8, u8) = (0x0f, 0xf0, 0xfc);

pub fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb { r, g, b }
}

/// `steps` colors evenly spaced from `from` to `to`, both ends included.
fn gradient(from: (u8, u8, u8), to: (u8, u8, u8), steps: usize) -> Vec<Color> {
    let mix = |a: u8, b: u8, t: f64| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
    (0..steps)
        .map(|i| {
            let t = if steps > 1 {
                i as f64 / (steps - 1) as f64
            } else {
                1.0
            };
            rgb((mix(from.0, to.0, t), mix(from.1, to.1, t), mix(from.2, to.2, t)))
        })
        .collect()
}

fn render_title() -> String {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert("HUB-SIM").map(|f| f.to_string()))
        .unwrap_or_else(|| "HUB-SIM".to_string())
}

fn write_banner(out: &mut impl Write, title: &str) -> std::io::Result<()> {
    let lines: Vec<&str> = title.lines().collect();
    for (line, color) in lines.iter().zip(gradient(NEON_PURPLE, CYBER_GREEN, lines.len())) {
        out.queue(SetForegroundColor(color))?
            .queue(Print(line))?
            .queue(Print("\r\n"))?;
    }
    out.queue(SetForegroundColor(rgb(CYBER_GREEN)))?
        .queue(Print(format!(
            "v{} · agent hub simulation\r\n",
            env!("CARGO_PKG_VERSION")
        )))?
        .queue(ResetColor)?;
    out.flush()
}

/// Prints the banner and version line. Terminal errors are ignored.
pub fn print_welcome() {
    let _ = write_banner(&mut stdout(), &render_title());
}
