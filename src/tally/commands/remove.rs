use crate::commands::{CmdMessage, CmdResult, WritePolicy, CAS_ATTEMPTS};
use crate::error::{Result, TallyError};
use crate::model::Item;
use crate::store::{CasOutcome, DocumentStore};
use tracing::debug;

/// Decrement-or-delete: the last unit deletes the record, so a quantity of
/// zero is never stored. A decrement on an absent name is inert — the view
/// that offered the action may be stale, so this re-validates against the
/// store instead of trusting it.
pub fn run<S: DocumentStore>(store: &mut S, name: &str, policy: WritePolicy) -> Result<CmdResult> {
    let outcome = match policy {
        WritePolicy::Unguarded => match store.get(name)? {
            None => None,
            Some(item) if item.quantity <= 1 => {
                store.delete(name)?;
                Some(0)
            }
            Some(item) => {
                let next = item.quantity - 1;
                store.upsert_quantity(name, next)?;
                Some(next)
            }
        },
        WritePolicy::Checked => checked_decrement(store, name)?,
    };

    let mut result = CmdResult::default();
    match outcome {
        None => result.add_message(CmdMessage::info(format!("{} is not tracked", name))),
        Some(0) => result.add_message(CmdMessage::success(format!("Removed last {}", name))),
        Some(left) => {
            result.affected.push(Item::new(name, left));
            result.add_message(CmdMessage::success(format!(
                "Removed one {} ({} left)",
                name, left
            )));
        }
    }
    Ok(result)
}

/// Returns the remaining quantity, `Some(0)` when the record was deleted, or
/// `None` when there was nothing to decrement.
fn checked_decrement<S: DocumentStore>(store: &mut S, name: &str) -> Result<Option<u32>> {
    for _ in 0..CAS_ATTEMPTS {
        match store.get(name)? {
            None => return Ok(None),
            Some(item) if item.quantity <= 1 => {
                if store.delete_if(name, item.quantity)? == CasOutcome::Applied {
                    return Ok(Some(0));
                }
            }
            Some(item) => {
                let next = item.quantity - 1;
                if store.upsert_if(name, Some(item.quantity), next)? == CasOutcome::Applied {
                    return Ok(Some(next));
                }
            }
        }
        debug!(name, "decrement lost a race, retrying");
    }
    Err(TallyError::WriteConflict(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::MemoryStore;

    #[test]
    fn decrements_when_more_than_one_left() {
        let mut store = StoreFixture::new().with_item("apple", 3).store;
        let result = run(&mut store, "apple", WritePolicy::Unguarded).unwrap();

        assert_eq!(store.get("apple").unwrap().unwrap().quantity, 2);
        assert_eq!(result.affected[0].quantity, 2);
    }

    #[test]
    fn deletes_record_at_quantity_one() {
        let mut store = StoreFixture::new().with_item("apple", 1).store;
        run(&mut store, "apple", WritePolicy::Unguarded).unwrap();

        assert_eq!(store.get("apple").unwrap(), None);
    }

    #[test]
    fn absent_name_is_a_no_op_not_an_error() {
        let mut store = MemoryStore::new();
        let result = run(&mut store, "ghost", WritePolicy::Unguarded).unwrap();

        assert!(store.fetch_all().unwrap().is_empty());
        assert!(result.affected.is_empty());
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn checked_policy_deletes_last_unit() {
        let mut store = StoreFixture::new().with_item("apple", 1).store;
        run(&mut store, "apple", WritePolicy::Checked).unwrap();
        assert_eq!(store.get("apple").unwrap(), None);
    }
}
