use crate::history::CommitHistory;

pub fn display_error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {}", message); // Red color
}

pub fn display_success(message: &str) {
    println!("\x1b[32m✓\x1b[0m {}", message); // Green color
}

pub fn display_status(message: &str) {
    println!("\x1b[33m→\x1b[0m {}", message); // Yellow color
}

pub fn display_commit_summary(history: &CommitHistory) {
    println!("\n\x1b[1mAnalyzing {} commits\x1b[0m", history.len());

    for (i, record) in history.iter().take(10).enumerate() {
        let subject: String = record.subject().chars().take(60).collect();
        println!("  {}. {}", i + 1, subject);
    }

    if history.len() > 10 {
        println!("  ... and {} more commits", history.len() - 10);
    }
}
