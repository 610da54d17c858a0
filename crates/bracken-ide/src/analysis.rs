mod matching_brackets;
mod selection_ranges;

use salsa::DatabaseImpl;

#[derive(Default)]
pub struct Analysis {
    db: DatabaseImpl,
}

impl Analysis {
    pub fn db(&self) -> &DatabaseImpl {
        &self.db
    }

    pub fn db_mut(&mut self) -> &mut DatabaseImpl {
        &mut self.db
    }
}
