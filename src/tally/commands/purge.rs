use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DocumentStore;

/// Remove a record outright, whatever its quantity.
pub fn run<S: DocumentStore>(store: &mut S, name: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    match store.get(name)? {
        Some(item) => {
            store.delete(name)?;
            result.add_message(CmdMessage::success(format!(
                "Removed all {} ({} discarded)",
                name, item.quantity
            )));
        }
        None => result.add_message(CmdMessage::info(format!("{} is not tracked", name))),
    }

    Ok(result)
}
