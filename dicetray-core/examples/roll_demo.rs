//! Roll a handful of formulas and print the outcomes.

use dicetray_core::{RollSession, SessionConfig};

fn main() {
    println!("=== dicetray roll demo ===\n");

    let mut session = RollSession::new(SessionConfig::new());

    roll(&mut session, "1d20", "Basic d20");
    roll(&mut session, "2d6+3", "Attack with modifier");
    roll(&mut session, "d100", "Percentile");
    roll(&mut session, "-1d6+2", "Penalty die");
    roll(&mut session, "3d6", "Stat roll");
    roll(&mut session, "2d0", "Impossible die");
    roll(&mut session, "abc", "Not dice at all");

    println!("\nHistory (newest first):");
    for entry in session.entries() {
        let values: Vec<i64> = entry.rolls.iter().map(|d| d.signed_value()).collect();
        let tag = entry
            .tag
            .map(|t| format!(" [{t}]"))
            .unwrap_or_default();
        println!("  {:>8} -> {:>4}  {:?}{}", entry.formula, entry.total, values, tag);
    }
}

fn roll(session: &mut RollSession, formula: &str, description: &str) {
    print!("Rolling {formula} ({description})... ");
    match session.roll(formula) {
        Ok(entry) => {
            let values: Vec<u32> = entry.rolls.iter().map(|d| d.value).collect();
            println!("total {} {:?}", entry.total, values);
        }
        Err(e) => {
            println!("REJECTED: {e}");
        }
    }
}
