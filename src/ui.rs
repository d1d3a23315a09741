use crate::makefile::MakefileVars;

pub fn display_error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {}", message); // Red color
}

pub fn display_success(message: &str) {
    println!("\x1b[32m✓\x1b[0m {}", message); // Green color
}

pub fn display_status(message: &str) {
    println!("\x1b[33m→\x1b[0m {}", message); // Yellow color
}

pub fn display_proposed_update(current: &str, target: &str) {
    println!("\n\x1b[1mProposed Version Change:\x1b[0m");
    println!("  From: \x1b[31m{}\x1b[0m", current);
    println!("  To:   \x1b[32m{}\x1b[0m", target);
}

pub fn display_planned_vars(vars: &MakefileVars) {
    println!("  GO_VERSION_MAJOR_MINOR: {}", vars.major_minor);
    println!("  GO_VERSION_PATCH: {}", vars.patch);
    println!("  PKG_HASH: {}", vars.hash);
}
