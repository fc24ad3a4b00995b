use jfs::Store;
use std::{
    io::{self, ErrorKind},
    path::Path,
};

use smartcity_boundary as json;
use smartcity_core::{
    entities::Session,
    session::{SessionStore, StoreError},
};

const SESSION_ID: &str = "session";

/// Keeps the session in a JSON file.
pub struct JsonSessionStore {
    json_store: Store,
}

impl JsonSessionStore {
    pub fn try_new<P: AsRef<Path>>(directory: P) -> io::Result<Self> {
        let json_store = Store::new(directory)?;
        Ok(Self { json_store })
    }
}

fn store_error(err: io::Error) -> StoreError {
    StoreError(err.to_string())
}

impl SessionStore for JsonSessionStore {
    fn load(&self) -> Result<Option<Session>, StoreError> {
        match self.json_store.get::<json::Session>(SESSION_ID) {
            Ok(session) => Ok(Some(session.into())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(store_error(err)),
        }
    }

    fn save(&self, session: &Session) -> Result<(), StoreError> {
        let session = json::Session::from(session.clone());
        self.json_store
            .save_with_id(&session, SESSION_ID)
            .map_err(store_error)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match self.json_store.delete(SESSION_ID) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(store_error(err)),
            _ => Ok(()),
        }
    }
}
