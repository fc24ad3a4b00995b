//! Keeps the list of one entity kind in sync with the backend.
//!
//! Every mutation is validated locally first and reconciled
//! afterwards by reloading the whole list: the backend's
//! response is the only source of truth.

use std::{
    cell::{Cell, Ref, RefCell},
    mem,
    rc::Rc,
};

use thiserror::Error;

use crate::{
    entities::Id,
    gateways::{ConfirmGate, EntityGateway, GatewayError, Notification, Notify, StatsRefresh},
    kinds::EntityKind,
    validate::{Validate, ValidationErrors},
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Failed to load: {0}")]
    Load(GatewayError),
    #[error("Failed to save: {0}")]
    Save(GatewayError),
    #[error("Failed to delete: {0}")]
    Delete(GatewayError),
    #[error("Invalid input: {0}")]
    Invalid(ValidationErrors),
    #[error("Another operation is still in progress")]
    Busy,
    #[error("The form is not open")]
    NoOpenForm,
    #[error("The view has been closed")]
    Unmounted,
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    Idle,
    Loading,
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(Id),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Form<D> {
    Closed,
    Open {
        draft: D,
        mode: FormMode,
        errors: ValidationErrors,
        /// Message of the last failed save attempt.
        failure: Option<String>,
    },
    Submitting {
        draft: D,
        mode: FormMode,
    },
}

impl<D> Form<D> {
    fn open(draft: D, mode: FormMode) -> Self {
        Self::Open {
            draft,
            mode,
            errors: ValidationErrors::new(),
            failure: None,
        }
    }

    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    pub const fn draft(&self) -> Option<&D> {
        match self {
            Self::Closed => None,
            Self::Open { draft, .. } | Self::Submitting { draft, .. } => Some(draft),
        }
    }

    pub const fn errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Open { errors, .. } => Some(errors),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deletion {
    Idle,
    Confirming(Id),
    Deleting(Id),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submitted {
    Created,
    Updated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Deleted,
    Declined,
}

struct State<K: EntityKind> {
    list: ListState,
    records: Vec<K::Record>,
    banner: Option<Error>,
    form: Form<K::Draft>,
    deletion: Deletion,
}

/// Blocks further mutations while one is in flight.
struct Pending<'a>(&'a Cell<bool>);

impl<'a> Pending<'a> {
    fn try_begin(flag: &'a Cell<bool>) -> Result<Self> {
        if flag.replace(true) {
            return Err(Error::Busy);
        }
        Ok(Self(flag))
    }
}

impl Drop for Pending<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Owns the canonical list of the entity kind `K`.
///
/// No borrow of the internal state is held across an `.await`.
pub struct Synchronizer<K: EntityKind, G, C> {
    gateway: G,
    confirm: C,
    stats: Option<Rc<dyn StatsRefresh>>,
    notifier: Option<Rc<dyn Notify>>,
    state: RefCell<State<K>>,
    pending: Cell<bool>,
    mounted: Cell<bool>,
}

impl<K, G, C> Synchronizer<K, G, C>
where
    K: EntityKind,
    G: EntityGateway<K>,
    C: ConfirmGate,
{
    pub fn new(gateway: G, confirm: C) -> Self {
        Self {
            gateway,
            confirm,
            stats: None,
            notifier: None,
            state: RefCell::new(State {
                list: ListState::Idle,
                records: vec![],
                banner: None,
                form: Form::Closed,
                deletion: Deletion::Idle,
            }),
            pending: Cell::new(false),
            mounted: Cell::new(true),
        }
    }

    #[must_use]
    pub fn with_stats(mut self, stats: Rc<dyn StatsRefresh>) -> Self {
        self.stats = Some(stats);
        self
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: Rc<dyn Notify>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn records(&self) -> Ref<'_, [K::Record]> {
        Ref::map(self.state.borrow(), |s| s.records.as_slice())
    }

    /// Records whose name contains `query`, ignoring the case.
    pub fn filtered(&self, query: &str) -> Vec<K::Record> {
        let query = query.trim().to_lowercase();
        self.records()
            .iter()
            .filter(|r| query.is_empty() || K::name(r).to_lowercase().contains(&query))
            .cloned()
            .collect()
    }

    pub fn find(&self, id: &Id) -> Option<K::Record> {
        self.records().iter().find(|r| K::id(r) == id).cloned()
    }

    pub fn list_state(&self) -> ListState {
        self.state.borrow().list
    }

    pub fn form(&self) -> Ref<'_, Form<K::Draft>> {
        Ref::map(self.state.borrow(), |s| &s.form)
    }

    pub fn deletion(&self) -> Deletion {
        self.state.borrow().deletion.clone()
    }

    /// The error of the last failed load, if any.
    pub fn banner(&self) -> Option<Error> {
        self.state.borrow().banner.clone()
    }

    pub fn dismiss_banner(&self) {
        self.state.borrow_mut().banner = None;
    }

    /// A create, update or delete is in flight.
    pub fn is_busy(&self) -> bool {
        self.pending.get()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.get()
    }

    /// Responses that arrive after this call are discarded.
    pub fn unmount(&self) {
        log::debug!("Unmount {} view", K::RESOURCE);
        self.mounted.set(false);
    }

    pub async fn load(&self) -> Result<()> {
        log::debug!("Load {}", K::RESOURCE);
        self.state.borrow_mut().list = ListState::Loading;
        let result = self.gateway.fetch_all().await;
        if !self.is_mounted() {
            log::debug!("Discard stale list of {}", K::RESOURCE);
            return Err(Error::Unmounted);
        }
        let err = {
            let mut state = self.state.borrow_mut();
            state.list = ListState::Ready;
            match result {
                Ok(records) => {
                    log::debug!("Loaded {} {}", records.len(), K::RESOURCE);
                    state.records = records;
                    state.banner = None;
                    return Ok(());
                }
                Err(err) => {
                    let err = Error::Load(err);
                    log::warn!("Unable to load {}: {err}", K::RESOURCE);
                    state.banner = Some(err.clone());
                    err
                }
            }
        };
        self.notify(Notification::error(err.to_string()));
        Err(err)
    }

    pub fn open_create(&self) -> Result<()> {
        self.open_create_with(K::Draft::default())
    }

    /// Opens the form with a prepared draft, e.g. a position picked on the map.
    pub fn open_create_with(&self, draft: K::Draft) -> Result<()> {
        self.open(draft, FormMode::Create)
    }

    pub fn open_edit(&self, record: &K::Record) -> Result<()> {
        let mode = FormMode::Edit(K::id(record).clone());
        self.open(K::draft_from(record), mode)
    }

    fn open(&self, draft: K::Draft, mode: FormMode) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if matches!(state.form, Form::Submitting { .. }) {
            return Err(Error::Busy);
        }
        log::debug!("Open {} form ({mode:?})", K::LABEL);
        state.form = Form::open(draft, mode);
        Ok(())
    }

    pub fn update_draft(&self, modify: impl FnOnce(&mut K::Draft)) -> Result<()> {
        let mut state = self.state.borrow_mut();
        match &mut state.form {
            Form::Open { draft, .. } => {
                modify(draft);
                Ok(())
            }
            Form::Submitting { .. } => Err(Error::Busy),
            Form::Closed => Err(Error::NoOpenForm),
        }
    }

    /// Closes the form without aborting a running request.
    pub fn close_form(&self) {
        self.state.borrow_mut().form = Form::Closed;
    }

    pub async fn submit(&self) -> Result<Submitted> {
        let _pending = Pending::try_begin(&self.pending)?;
        let (payload, mode) = {
            let mut state = self.state.borrow_mut();
            let (draft, mode) = match &state.form {
                Form::Open { draft, mode, .. } => (draft.clone(), mode.clone()),
                Form::Submitting { .. } => return Err(Error::Busy),
                Form::Closed => return Err(Error::NoOpenForm),
            };
            let payload = match draft.validate() {
                Ok(payload) => payload,
                Err(errors) => {
                    log::debug!("Invalid {} draft: {errors}", K::LABEL);
                    state.form = Form::Open {
                        draft,
                        mode,
                        errors: errors.clone(),
                        failure: None,
                    };
                    return Err(Error::Invalid(errors));
                }
            };
            state.form = Form::Submitting {
                draft,
                mode: mode.clone(),
            };
            (payload, mode)
        };

        let result = match &mode {
            FormMode::Create => self.gateway.create(&payload).await,
            FormMode::Edit(id) => self.gateway.update(id, &payload).await,
        };
        if !self.is_mounted() {
            log::debug!("Discard stale response of {} submission", K::LABEL);
            return Err(Error::Unmounted);
        }

        match result {
            Ok(()) => {
                {
                    let mut state = self.state.borrow_mut();
                    if matches!(state.form, Form::Submitting { .. }) {
                        state.form = Form::Closed;
                    }
                }
                let submitted = match mode {
                    FormMode::Create => {
                        self.notify(Notification::success(format!("New {} added", K::LABEL)));
                        Submitted::Created
                    }
                    FormMode::Edit(_) => {
                        self.notify(Notification::success(format!("The {} was updated", K::LABEL)));
                        Submitted::Updated
                    }
                };
                self.reconcile().await;
                Ok(submitted)
            }
            Err(err) => {
                let err = Error::Save(err);
                log::warn!("Unable to save {}: {err}", K::LABEL);
                {
                    let mut state = self.state.borrow_mut();
                    // The form might have been closed or reopened in the meantime.
                    if matches!(state.form, Form::Submitting { .. }) {
                        if let Form::Submitting { draft, mode } =
                            mem::replace(&mut state.form, Form::Closed)
                        {
                            state.form = Form::Open {
                                draft,
                                mode,
                                errors: ValidationErrors::new(),
                                failure: Some(err.to_string()),
                            };
                        }
                    }
                }
                self.notify(Notification::error(err.to_string()));
                Err(err)
            }
        }
    }

    pub async fn remove(&self, id: &Id) -> Result<Removal> {
        let _pending = Pending::try_begin(&self.pending)?;
        self.state.borrow_mut().deletion = Deletion::Confirming(id.clone());
        let confirmed = self
            .confirm
            .confirm(&format!("Are you sure you want to delete this {}?", K::LABEL))
            .await;
        if !self.is_mounted() {
            return Err(Error::Unmounted);
        }
        if !confirmed {
            log::debug!("Deletion of {} {id} declined", K::LABEL);
            self.state.borrow_mut().deletion = Deletion::Idle;
            return Ok(Removal::Declined);
        }

        self.state.borrow_mut().deletion = Deletion::Deleting(id.clone());
        let result = self.gateway.delete(id).await;
        if !self.is_mounted() {
            log::debug!("Discard stale response of {} deletion", K::LABEL);
            return Err(Error::Unmounted);
        }
        self.state.borrow_mut().deletion = Deletion::Idle;

        match result {
            Ok(()) => {
                self.notify(Notification::success(format!("The {} was deleted", K::LABEL)));
                self.reconcile().await;
                Ok(Removal::Deleted)
            }
            Err(err) => {
                let err = Error::Delete(err);
                log::warn!("Unable to delete {} {id}: {err}", K::LABEL);
                self.notify(Notification::error(err.to_string()));
                Err(err)
            }
        }
    }

    async fn reconcile(&self) {
        // A failed reload is already reported by the banner.
        if let Err(Error::Unmounted) = self.load().await {
            return;
        }
        self.refresh_stats();
    }

    fn refresh_stats(&self) {
        if let Some(stats) = &self.stats {
            stats.refresh();
        }
    }

    fn notify(&self, notification: Notification) {
        if let Some(notifier) = &self.notifier {
            notifier.notify(notification);
        }
    }
}
