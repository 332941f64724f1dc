use crate::domain::session::SessionState;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionRow {
    session: String,
    balance: String,
    last_bet_total: String,
    last_win_amount: String,
}

impl From<SessionState> for SessionRow {
    fn from(state: SessionState) -> Self {
        Self {
            session: state.session.to_string(),
            balance: state.balance.value().normalize().to_string(),
            last_bet_total: state.last_bet_total.normalize().to_string(),
            last_win_amount: state.last_win_amount.normalize().to_string(),
        }
    }
}

/// Writes session stats as CSV, one row per session ordered by session id.
pub struct SessionWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> SessionWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_sessions(&mut self, mut sessions: Vec<SessionState>) -> Result<()> {
        sessions.sort_by(|a, b| a.session.cmp(&b.session));
        if sessions.is_empty() {
            self.writer
                .write_record(["session", "balance", "lastBetTotal", "lastWinAmount"])?;
        }
        for state in sessions {
            self.writer.serialize(SessionRow::from(state))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
