use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

pub struct DrillHelper {
    commands: Vec<String>,
    functions: Vec<String>,
}

impl DrillHelper {
    pub fn new() -> Self {
        Self {
            commands: vec![
                "answer".to_string(),
                "new".to_string(),
                "share".to_string(),
                "load".to_string(),
                "solution".to_string(),
                "stats".to_string(),
                "latex on".to_string(),
                "latex off".to_string(),
                "json on".to_string(),
                "json off".to_string(),
                "config".to_string(),
                "help".to_string(),
                "quit".to_string(),
                "exit".to_string(),
            ],
            functions: vec!["sqrt".to_string(), "abs".to_string()],
        }
    }
}

impl Completer for DrillHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> Result<(usize, Vec<Pair>), ReadlineError> {
        let (start, word) = extract_word(line, pos);
        let mut matches = Vec::new();

        // Check commands
        for cmd in &self.commands {
            if cmd.starts_with(word) {
                matches.push(Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                });
            }
        }

        // Check functions
        for func in &self.functions {
            if func.starts_with(word) {
                matches.push(Pair {
                    display: func.clone(),
                    replacement: func.clone(),
                });
            }
        }

        Ok((start, matches))
    }
}

impl Hinter for DrillHelper {
    type Hint = String;
    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for DrillHelper {}

impl Validator for DrillHelper {}

impl Helper for DrillHelper {}

fn extract_word(line: &str, pos: usize) -> (usize, &str) {
    let line = &line[..pos];
    if line.is_empty() {
        return (0, "");
    }

    let mut start = pos;
    for (i, c) in line.char_indices().rev() {
        if c.is_whitespace() || c == '(' || c == ',' || c == '+' || c == '-' || c == '*' || c == '/'
        {
            break;
        }
        start = i;
    }
    (start, &line[start..pos])
}
