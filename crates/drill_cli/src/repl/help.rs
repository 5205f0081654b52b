use drill_engine::WireReply;

use super::{reply_notice, Repl};

impl Repl {
    pub(crate) fn help_reply(&self) -> WireReply {
        let text = "\
Limit Drill Commands:

  <expr>                  Submit an answer (e.g. 1/7, 0.25, sqrt(1/49))
  answer <expr>           Same as typing the expression alone
  new                     Generate a fresh problem
  share                   Print the share token for this problem
  load <token>            Load a shared problem from its token
  solution                Show the derivation (after solving or failing)
  stats                   Show streak and solved counters
  latex <on|off>          Render statements as LaTeX
  json <on|off>           Emit replies as JSON lines
  config <list|save|restore> Inspect or persist display settings
  help                    Show this overview
  quit / exit             Leave the trainer";
        reply_notice(text)
    }
}
