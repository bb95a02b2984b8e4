//! History file contents in each dialect's on-disk format.

use histrace_types::Dialect;

/// One `(timestamp, command)` pair per logical command. Multi-line bash and
/// zsh commands carry their trailing backslashes.
pub type Record<'a> = (i64, &'a str);

/// Render records the way the given shell writes its history file.
pub fn history_text(dialect: Dialect, records: &[Record<'_>]) -> String {
    let mut text = String::new();
    for (timestamp, command) in records {
        match dialect {
            Dialect::Bash => {
                text.push_str(&format!("#{}\n{}\n", timestamp, command));
            }
            Dialect::Zsh => {
                text.push_str(&format!(": {}:0;{}\n", timestamp, command));
            }
            Dialect::Fish => {
                let escaped = command.replace('\\', "\\\\").replace('\n', "\\n");
                text.push_str(&format!("- cmd: {}\n  when: {}\n", escaped, timestamp));
            }
        }
    }
    text
}
