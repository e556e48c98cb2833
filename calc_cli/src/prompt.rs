//! Line-oriented prompts over any reader/writer pair.

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print a line without waiting for input
    pub fn say(&mut self, line: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", line.as_ref()).context("writing to terminal")
    }

    /// Read one trimmed line. End of input is an error.
    pub fn text(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{label}").context("writing to terminal")?;
        self.output.flush().context("flushing terminal")?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("reading from terminal")?;
        if read == 0 {
            bail!("input closed while waiting for '{}'", label.trim());
        }
        Ok(line.trim().to_string())
    }

    pub fn number(&mut self, label: &str) -> Result<f64> {
        let raw = self.text(label)?;
        parse_number(&raw).with_context(|| format!("'{}'", label.trim()))
    }

    /// Number with a default used for an empty answer
    pub fn number_or(&mut self, label: &str, default: f64) -> Result<f64> {
        let raw = self.text(label)?;
        if raw.is_empty() {
            return Ok(default);
        }
        parse_number(&raw).with_context(|| format!("'{}'", label.trim()))
    }

    /// Optional number, `None` for an empty answer
    pub fn maybe_number(&mut self, label: &str) -> Result<Option<f64>> {
        let raw = self.text(label)?;
        if raw.is_empty() {
            return Ok(None);
        }
        parse_number(&raw).map(Some).with_context(|| format!("'{}'", label.trim()))
    }

    /// `y`/`o` (oui) answers yes, anything else no
    pub fn yes_no(&mut self, label: &str) -> Result<bool> {
        let raw = self.text(label)?;
        Ok(matches!(raw.to_lowercase().as_str(), "y" | "yes" | "o" | "oui"))
    }

    /// Pick from a numbered list, answers start at 1
    pub fn choose<T: Copy>(&mut self, label: &str, options: &[(T, &str)]) -> Result<T> {
        for (i, (_, name)) in options.iter().enumerate() {
            self.say(format!("\t  {}  {}", i + 1, name))?;
        }
        let raw = self.text(label)?;
        raw.parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| options.get(i))
            .map(|(value, _)| *value)
            .with_context(|| format!("'{raw}' is not one of 1 to {}", options.len()))
    }
}

/// Parse a decimal, accepting a comma as separator
pub fn parse_number(raw: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .replace(',', ".")
        .parse()
        .with_context(|| format!("'{raw}' is not a number"))?;
    if !value.is_finite() {
        bail!("'{raw}' is not a finite number");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(script: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_numbers() {
        let mut p = prompter("12.5\n3,25\n\nabc\n");
        assert_eq!(p.number("a = ").unwrap(), 12.5);
        assert_eq!(p.number("b = ").unwrap(), 3.25);
        assert_eq!(p.number_or("c = ", 7.0).unwrap(), 7.0);
        assert!(p.number("d = ").is_err());
    }

    #[test]
    fn test_end_of_input_is_error() {
        let mut p = prompter("");
        assert!(p.text("x = ").is_err());
    }

    #[test]
    fn test_yes_no_and_choose() {
        let mut p = prompter("y\nn\noui\n2\n9\n");
        assert!(p.yes_no("? ").unwrap());
        assert!(!p.yes_no("? ").unwrap());
        assert!(p.yes_no("? ").unwrap());
        let options = [(10, "ten"), (20, "twenty")];
        assert_eq!(p.choose("pick: ", &options).unwrap(), 20);
        assert!(p.choose("pick: ", &options).is_err());
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(parse_number("inf").is_err());
        assert!(parse_number("NaN").is_err());
    }
}
