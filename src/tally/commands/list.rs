use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::DocumentStore;

pub fn run<S: DocumentStore>(store: &S) -> Result<CmdResult> {
    let items = store.fetch_all()?;
    Ok(CmdResult::default().with_listed(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn lists_every_stored_item() {
        let store = StoreFixture::new()
            .with_item("apple", 3)
            .with_item("banana", 2)
            .store;

        let result = run(&store).unwrap();
        assert_eq!(result.listed.len(), 2);
    }
}
