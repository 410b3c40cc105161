use crate::commands::{CmdMessage, CmdResult, WritePolicy, CAS_ATTEMPTS};
use crate::error::{Result, TallyError};
use crate::model::Item;
use crate::store::{CasOutcome, DocumentStore};
use tracing::debug;

/// Increment-or-create: adding a brand-new item and incrementing an existing
/// one are the same operation, distinguished only by whether a record already
/// exists for the name.
pub fn run<S: DocumentStore>(store: &mut S, name: &str, policy: WritePolicy) -> Result<CmdResult> {
    if name.trim().is_empty() {
        return Err(TallyError::InvalidName);
    }

    let quantity = match policy {
        WritePolicy::Unguarded => {
            let next = match store.get(name)? {
                Some(item) => item.quantity.saturating_add(1),
                None => 1,
            };
            store.upsert_quantity(name, next)?;
            next
        }
        WritePolicy::Checked => checked_increment(store, name)?,
    };

    let mut result = CmdResult::default().with_affected(vec![Item::new(name, quantity)]);
    result.add_message(if quantity == 1 {
        CmdMessage::success(format!("Now tracking {}", name))
    } else {
        CmdMessage::success(format!("Added one {} ({} total)", name, quantity))
    });
    Ok(result)
}

fn checked_increment<S: DocumentStore>(store: &mut S, name: &str) -> Result<u32> {
    for _ in 0..CAS_ATTEMPTS {
        let current = store.get(name)?.map(|item| item.quantity);
        let next = current.map_or(1, |q| q.saturating_add(1));
        if store.upsert_if(name, current, next)? == CasOutcome::Applied {
            return Ok(next);
        }
        debug!(name, "increment lost a race, retrying");
    }
    Err(TallyError::WriteConflict(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    #[test]
    fn creates_absent_item_with_quantity_one() {
        let mut store = MemoryStore::new();
        let result = run(&mut store, "apple", WritePolicy::Unguarded).unwrap();

        assert_eq!(store.get("apple").unwrap().unwrap().quantity, 1);
        assert_eq!(result.affected[0].quantity, 1);
    }

    #[test]
    fn increments_present_item() {
        let mut store = MemoryStore::new();
        store.upsert_quantity("apple", 2).unwrap();

        let result = run(&mut store, "apple", WritePolicy::Unguarded).unwrap();

        assert_eq!(store.get("apple").unwrap().unwrap().quantity, 3);
        assert_eq!(result.affected[0].quantity, 3);
    }

    #[test]
    fn rejects_empty_name_before_touching_the_store() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            run(&mut store, "", WritePolicy::Unguarded),
            Err(TallyError::InvalidName)
        ));
        assert!(matches!(
            run(&mut store, "   ", WritePolicy::Unguarded),
            Err(TallyError::InvalidName)
        ));
        assert!(store.fetch_all().unwrap().is_empty());
    }

    #[test]
    fn checked_policy_increments_like_unguarded() {
        let mut store = MemoryStore::new();
        run(&mut store, "apple", WritePolicy::Checked).unwrap();
        run(&mut store, "apple", WritePolicy::Checked).unwrap();
        assert_eq!(store.get("apple").unwrap().unwrap().quantity, 2);
    }
}
