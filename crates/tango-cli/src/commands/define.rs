//! Word lookup
//!
//! Usage: tango <WORD>

use std::io::Write;
use std::path::Path;
use tango_core::Term;

pub fn execute(db_path: &Path, word: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = super::open_store(db_path)?;
    let terms = tango_store::define(&store, word)?;
    store.close()?;

    let stdout = std::io::stdout();
    write_terms(&mut stdout.lock(), &terms)?;
    Ok(())
}

/// One block per hit: headword and reading, dictionary title, glossary lines, blank line
pub fn write_terms(out: &mut impl Write, terms: &[Term]) -> std::io::Result<()> {
    for term in terms {
        writeln!(out, "{}({})", term.expression(), term.reading())?;
        writeln!(out, "[{}]", term.dictionary)?;
        for gloss in term.glossary() {
            writeln!(out, "{}", gloss.trim_end_matches('\n'))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tango_core::TermEntry;

    fn term(expression: &str, reading: &str, glossary: &[&str], dictionary: &str) -> Term {
        Term {
            entry: TermEntry::new(
                expression,
                reading,
                glossary.iter().map(|g| g.to_string()).collect(),
            ),
            dictionary: dictionary.to_string(),
        }
    }

    #[test]
    fn test_block_layout() {
        let mut out = Vec::new();
        write_terms(
            &mut out,
            &[
                term("犬", "いぬ", &["dog", "hound"], "T1"),
                term("犬", "いぬ", &["canine"], "T2"),
            ],
        )
        .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "犬(いぬ)\n[T1]\ndog\nhound\n\n犬(いぬ)\n[T2]\ncanine\n\n"
        );
    }

    #[test]
    fn test_no_hits_prints_nothing() {
        let mut out = Vec::new();
        write_terms(&mut out, &[]).unwrap();
        assert!(out.is_empty());
    }
}
