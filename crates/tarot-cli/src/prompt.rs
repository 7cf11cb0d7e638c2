//! Line-based interactive prompts.

use std::io::{BufRead, Write};

/// Reads answers from `input` and writes questions to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, label: &str) -> Result<Option<String>, String> {
        write!(self.output, "{label}").map_err(|e| e.to_string())?;
        self.output.flush().map_err(|e| e.to_string())?;

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => Ok(None), // EOF
            Ok(_) => Ok(Some(line.trim().to_string())),
            Err(e) => Err(e.to_string()),
        }
    }

    /// Numbered menu. Enter picks the first option.
    pub fn choose(&mut self, title: &str, options: &[String]) -> Result<usize, String> {
        writeln!(self.output, "{title}").map_err(|e| e.to_string())?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "  {}) {option}", i + 1).map_err(|e| e.to_string())?;
        }

        loop {
            let answer = self
                .ask("Choice [1]: ")?
                .ok_or_else(|| "input ended before a choice was made".to_string())?;
            if answer.is_empty() {
                return Ok(0);
            }
            match answer.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Ok(n - 1),
                _ => writeln!(
                    self.output,
                    "Please enter a number between 1 and {}.",
                    options.len()
                )
                .map_err(|e| e.to_string())?,
            }
        }
    }

    /// Free text; empty input or EOF gives `None`.
    pub fn text(&mut self, label: &str) -> Result<Option<String>, String> {
        Ok(self.ask(label)?.filter(|s| !s.is_empty()))
    }

    /// Yes/no question. Empty input or EOF gives `default`.
    pub fn confirm(&mut self, label: &str, default: bool) -> Result<bool, String> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            let Some(answer) = self.ask(&format!("{label} {hint} "))? else {
                return Ok(default);
            };
            match answer.to_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "Please answer y or n.").map_err(|e| e.to_string())?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn options() -> Vec<String> {
        vec!["a".into(), "b".into(), "c".into()]
    }

    #[test]
    fn choose_by_number() {
        let mut p = prompter("2\n");
        assert_eq!(p.choose("Pick:", &options()).unwrap(), 1);
        let shown = String::from_utf8(p.output).unwrap();
        assert!(shown.contains("  3) c"));
    }

    #[test]
    fn choose_retries_invalid_then_defaults() {
        let mut p = prompter("9\nx\n\n");
        assert_eq!(p.choose("Pick:", &options()).unwrap(), 0);
        let shown = String::from_utf8(p.output).unwrap();
        assert_eq!(shown.matches("between 1 and 3").count(), 2);
    }

    #[test]
    fn choose_eof_is_error() {
        assert!(prompter("").choose("Pick:", &options()).is_err());
    }

    #[test]
    fn text_and_confirm() {
        let mut p = prompter("  Will it work?  \n\nmaybe\nYES\n");
        assert_eq!(p.text("Q: ").unwrap().as_deref(), Some("Will it work?"));
        assert_eq!(p.text("Q: ").unwrap(), None);
        assert!(p.confirm("Sure?", false).unwrap());
        assert!(p.confirm("Again?", true).unwrap());
    }
}
