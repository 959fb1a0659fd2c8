use colored::{Color, Colorize};
use std::time::Duration;

use crate::domain::baker::{BakerId, BakerSnapshot};
use crate::domain::pool::PoolSnapshot;

// Stable per-baker palette; wraps around for large fields.
const BAKER_COLORS: [Color; 14] = [
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::White,
    Color::BrightRed,
    Color::BrightGreen,
    Color::BrightYellow,
    Color::BrightBlue,
    Color::BrightMagenta,
    Color::BrightCyan,
    Color::BrightWhite,
];

pub fn baker_color(id: BakerId) -> Color {
    BAKER_COLORS[id % BAKER_COLORS.len()]
}

/// Prints the periodic status table: one row per baker, then the
/// kitchen availability block.
pub fn print_status_table(bakers: &[BakerSnapshot], pool: &PoolSnapshot, elapsed: Duration) {
    println!();
    println!("========================================[ {:6.2}s ]========================================", elapsed.as_secs_f64());
    println!("╔════════╦══════════════════════════╦═══════════════════════╗");
    println!("║ Baker  ║ State                    ║ Current Recipe        ║");
    println!("╠════════╬══════════════════════════╬═══════════════════════╣");
    for baker in bakers {
        let color = baker_color(baker.id);
        let recipe = baker.recipe.as_deref().unwrap_or("None");
        println!(
            "║ {} ║ {} ║ {} ║",
            format!("{:>6}", baker.id).color(color),
            format!("{:<24}", baker.state.label()).color(color),
            format!("{:<21}", recipe).color(color),
        );
    }
    println!("╚════════╩══════════════════════════╩═══════════════════════╝");
    println!("╔═════════════════════════════╗");
    println!("║ Kitchen Resources Available ║");
    println!("╠═════════════════════════════╣");
    for (kind, available) in pool.iter() {
        println!("║ {:<12} : {} / {}        ║", kind.label(), available, kind.capacity());
    }
    println!("╚═════════════════════════════╝");
}

/// Prints the final ranking once every baker is done.
pub fn print_final_ranking(order: &[BakerId], elapsed: Duration) {
    println!();
    println!("ALL BAKERS FINISHED in {:.2}s", elapsed.as_secs_f64());
    println!();
    println!("Final Results:");
    for (place, id) in order.iter().enumerate() {
        let line = format!("Baker {}", id);
        println!("{}. {}", place + 1, line.color(baker_color(*id)));
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_wraps_for_large_baker_fields() {
        assert_eq!(baker_color(0), baker_color(BAKER_COLORS.len()));
    }
}
