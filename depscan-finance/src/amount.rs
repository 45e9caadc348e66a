//! Currency amounts in statement rows ("1,250.00", "$80.00").

use anyhow::Result;
use regex::Regex;

#[derive(Debug, Clone)]
pub struct AmountParser {
    amount_re: Regex,
}

/// One amount found in a line, with its byte span (dollar sign included)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmountMatch {
    pub value: f64,
    pub start: usize,
    pub end: usize,
}

impl AmountParser {
    pub fn new() -> Result<Self> {
        let amount_re = Regex::new(r"\$?\b((?:\d{1,3}(?:,\d{3})+|\d+)\.\d{2})\b")?;
        Ok(Self { amount_re })
    }

    /// All amounts in reading order. Digits glued to a `*` belong to trace
    /// numbers (TRN*1*...) and are skipped.
    pub fn find(&self, line: &str) -> Vec<AmountMatch> {
        self.amount_re
            .captures_iter(line)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let num = caps.get(1)?;
                if line[..whole.start()].ends_with('*') {
                    return None;
                }
                let value = parse_amount(num.as_str())?;
                Some(AmountMatch {
                    value,
                    start: whole.start(),
                    end: whole.end(),
                })
            })
            .collect()
    }

    pub fn find_amounts(&self, line: &str) -> Vec<f64> {
        self.find(line).into_iter().map(|m| m.value).collect()
    }

    /// The transaction amount: statement rows print it before the running balance.
    pub fn first_amount(&self, text: &str) -> Option<f64> {
        self.find(text).first().map(|m| m.value)
    }

    /// `line` with every amount removed and whitespace collapsed
    pub fn strip_amounts(&self, line: &str) -> String {
        let mut out = String::with_capacity(line.len());
        let mut last = 0;
        for m in self.find(line) {
            out.push_str(&line[last..m.start]);
            out.push(' ');
            last = m.end;
        }
        out.push_str(&line[last..]);
        out.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// "1,250.00" -> 1250.0
pub fn parse_amount(s: &str) -> Option<f64> {
    s.trim()
        .trim_start_matches('$')
        .replace(',', "")
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_amount_is_transaction_not_balance() {
        let p = AmountParser::new().unwrap();
        let line = "Jun 02  METLIFE DENTAL/HCCLAIMPMT TRN*1*84512   1,250.00   18,402.17";
        assert_eq!(p.find_amounts(line), vec![1250.0, 18402.17]);
        assert_eq!(p.first_amount(line), Some(1250.0));
    }

    #[test]
    fn test_dollar_sign_and_plain_amounts() {
        let p = AmountParser::new().unwrap();
        assert_eq!(p.find_amounts("FEP DENTAL $80.00"), vec![80.0]);
        assert_eq!(p.find_amounts("deposit 12345.67"), vec![12345.67]);
    }

    #[test]
    fn test_trace_numbers_are_not_amounts() {
        let p = AmountParser::new().unwrap();
        assert_eq!(p.first_amount("HCCLAIMPMT TRN*1*1234.56"), None);
        assert_eq!(p.first_amount("Jun 14 DEPOSIT"), None);
        assert_eq!(p.first_amount("ref 1.5 units"), None);
    }

    #[test]
    fn test_strip_amounts() {
        let p = AmountParser::new().unwrap();
        assert_eq!(
            p.strip_amounts("FEP DENTAL 36C/HCCLAIMPMT   212.00   9,911.40"),
            "FEP DENTAL 36C/HCCLAIMPMT"
        );
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,250.00"), Some(1250.0));
        assert_eq!(parse_amount("$3.10"), Some(3.1));
        assert_eq!(parse_amount("n/a"), None);
    }
}
