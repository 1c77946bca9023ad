//! Status log shown to the user

use std::time::Duration;

use crate::domain::DecodedSymbol;

pub const WELCOME: &str = "Application loaded.  Click \"Open Image\" to load an image.";

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Append-only log of status lines
#[derive(Clone, Debug, Default)]
pub struct StatusLog {
    lines: Vec<String>,
}

impl StatusLog {
    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        log::info!("{}", line);
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[cfg(test)]
    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }

    /// Full log text, one line per entry
    pub fn text(&self) -> String {
        self.lines().join("\n")
    }

    /// Report a completed decode
    pub fn push_results(&mut self, symbols: &[DecodedSymbol], elapsed: Duration) {
        let n = symbols.len();
        self.push(format!("{} total barcode{} found.", n, plural(n)));
        if n > 0 {
            self.push(format!(
                "Found {} barcode{}:",
                n,
                if n > 1 { "s" } else { "" }
            ));
            for (i, symbol) in symbols.iter().enumerate() {
                self.push(format!("      Result #{}", i + 1));
                self.push(format!("           Direction: {}", symbol.direction_name()));
                self.push(format!("           Symbology: {}", symbol.symbology_name()));
                self.push(format!("           Text read: {}", symbol.text));
            }
        }
        self.push(format!("Total time: {:.3} seconds.", elapsed.as_secs_f64()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognition::orchestrator::tests::symbol;

    #[test]
    fn test_single_result_wording() {
        let mut log = StatusLog::default();
        log.push_results(&[symbol("HELLO")], Duration::from_millis(1234));
        assert_eq!(
            log.lines(),
            &[
                "1 total barcode found.",
                "Found 1 barcode:",
                "      Result #1",
                "           Direction: East",
                "           Symbology: Code 39",
                "           Text read: HELLO",
                "Total time: 1.234 seconds.",
            ]
        );
    }

    #[test]
    fn test_no_results_wording() {
        let mut log = StatusLog::default();
        log.push_results(&[], Duration::ZERO);
        assert_eq!(log.lines()[0], "0 total barcodes found.");
        assert_eq!(log.last(), Some("Total time: 0.000 seconds."));
        assert_eq!(log.lines().len(), 2);
    }
}
