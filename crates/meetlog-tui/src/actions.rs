use anyhow::Result;
use meetlog_core::domain::{Meeting, MeetingId, NewMeeting};
use meetlog_core::time::now_utc;
use meetlog_store::error::{StoreError, StoreErrorKind};
use meetlog_store::Store;
use tracing::info;

use crate::app::App;

#[derive(Debug, Clone)]
pub enum Action {
    CreateMeeting(NewMeeting),
    UpdateMeeting(Meeting),
    DeleteMeeting(MeetingId),
}

pub fn execute_action(app: &mut App, store: &mut Store, action: Action) -> Result<()> {
    match action {
        Action::CreateMeeting(input) => match store.create(now_utc(), input) {
            Ok(meeting) => {
                info!(id = %meeting.id, "meeting logged");
                app.finish_save(meeting.id, format!("Saved {}", meeting.company_name));
            }
            Err(err) => reject(app, err)?,
        },
        Action::UpdateMeeting(meeting) => match store.update(meeting) {
            Ok(meeting) => {
                info!(id = %meeting.id, "meeting edited");
                app.finish_save(meeting.id, format!("Updated {}", meeting.company_name));
            }
            Err(err) if err.kind() == StoreErrorKind::NotFound => {
                app.go_home();
                app.set_error("meeting no longer exists; edit discarded");
            }
            Err(err) => reject(app, err)?,
        },
        Action::DeleteMeeting(id) => {
            let company = store.get(id).map(|meeting| meeting.company_name.clone());
            if store.delete(id) {
                info!(%id, "meeting deleted");
            }
            app.go_home();
            match company {
                Some(company) => app.set_status(format!("Deleted {company}")),
                None => app.set_status("Meeting was already removed"),
            }
        }
    }
    Ok(())
}

/// Validation failures go back into the open form; anything else is a real error.
fn reject(app: &mut App, err: StoreError) -> Result<()> {
    match err {
        StoreError::Core(core) => {
            app.reject_form(core.to_string());
            Ok(())
        }
        other => Err(other.into()),
    }
}
