//! # Dispatcher
//!
//! The persistent front-end. It owns every piece of durable state: routing
//! entries, role slots, the storage area backends operate on, the event log,
//! and the table of installed backend code.
//!
//! # Flow
//!
//! ```text
//! Call ─▶ execute ─┬─ management selector ─▶ Governance check ─▶ Registry/roles ─▶ EventLog
//!                  └─ anything else ───────▶ Registry::resolve ─▶ backend(CallContext) ─▶ commit
//! ```
//!
//! Every mutating operation takes `&mut self`, so calls are serialized by
//! construction. Each call either commits completely or leaves no trace.

use crate::{
    backends::BackendSet,
    config::DispatcherConfig,
    governance::Governance,
    log::EventLog,
    management::{Management, is_reserved},
    registry::Registry,
};
use relay_core::{
    Address, Backend, Call, CallContext, DispatchError, Event, Output, Revert, Role,
    Selector, SharedBackend, StateStore,
};
use tracing::{Instrument, debug, info, warn};

/// Selector-routed dispatch proxy.
pub struct Dispatcher {
    address: Address,
    governance: Governance,
    registry: Registry,
    storage: StateStore,
    log: EventLog,
    backends: BackendSet,
    balance: u128,
}

impl Dispatcher {
    /// Deploy a dispatcher. `deployer` becomes Admin.
    pub fn new(deployer: Address, config: DispatcherConfig) -> Result<Self, DispatchError> {
        config.validate()?;
        let governance = Governance::new(deployer, config.moderator)?;
        let address = Address::derive(deployer, 0);
        info!(%address, admin = %deployer, moderator = %config.moderator, "dispatcher deployed");
        Ok(Self {
            address,
            governance,
            registry: Registry::new(),
            storage: StateStore::new(),
            log: EventLog::new(),
            backends: BackendSet::new(address),
            balance: 0,
        })
    }

    // ------------------------------------------------------------------
    // Front door
    // ------------------------------------------------------------------

    /// Handle any inbound call.
    ///
    /// Management selectors run the matching operation as `call.caller`;
    /// every other selector is forwarded to its registered backend.
    pub async fn execute(&mut self, call: Call) -> Result<Output, DispatchError> {
        match Management::decode(&call.data)? {
            Some(op) => {
                if call.value != 0 {
                    warn!(caller = %call.caller, "value sent to management operation");
                    return Err(DispatchError::NonPayable);
                }
                self.manage(call.caller, op)
            }
            None => self.forward(call).await,
        }
    }

    /// Run a decoded management operation as `caller`.
    pub fn manage(&mut self, caller: Address, op: Management) -> Result<Output, DispatchError> {
        match op {
            Management::AddEntry { selector, target } => self.add_entry(caller, selector, target),
            Management::UpdateEntry { selector, target } => {
                self.update_entry(caller, selector, target)
            }
            Management::RemoveEntry { selector } => self.remove_entry(caller, selector),
            Management::RenounceAdmin { successor } => self.renounce_admin(caller, successor),
            Management::RenounceModerator { successor } => {
                self.renounce_moderator(caller, successor)
            }
            Management::Resolve { selector } => {
                return Ok(Output::word(self.resolve(selector).unwrap_or(Address::ZERO)));
            }
            Management::Admin => return Ok(Output::word(self.admin())),
            Management::Moderator => return Ok(Output::word(self.moderator())),
        }
        .map(|()| Output::empty())
    }

    // ------------------------------------------------------------------
    // Routing entries (Moderator only)
    // ------------------------------------------------------------------

    /// Route `selector` to `target`.
    pub fn add_entry(
        &mut self,
        caller: Address,
        selector: Selector,
        target: Address,
    ) -> Result<(), DispatchError> {
        self.authorize(Role::Moderator, caller, "addEntry")?;
        if is_reserved(selector) {
            return Err(DispatchError::Reserved(selector));
        }
        self.registry.add(selector, target)?;
        self.check_layout(target);
        info!(%selector, %target, "entry added");
        self.log.append(Event::EntryAdded { selector, target });
        Ok(())
    }

    /// Route every signature in `signatures` to `target`.
    ///
    /// All-or-nothing: if any signature is malformed, reserved or already
    /// routed, nothing is added.
    pub fn add_entries(
        &mut self,
        caller: Address,
        signatures: &[&str],
        target: Address,
    ) -> Result<Vec<Selector>, DispatchError> {
        self.authorize(Role::Moderator, caller, "addEntry")?;

        let mut selectors = Vec::with_capacity(signatures.len());
        for signature in signatures {
            let selector = Selector::parse_signature(signature)?;
            if is_reserved(selector) {
                return Err(DispatchError::Reserved(selector));
            }
            self.registry.check_add(selector, target)?;
            if selectors.contains(&selector) {
                return Err(DispatchError::AlreadyExists(selector));
            }
            selectors.push(selector);
        }

        for (signature, selector) in signatures.iter().zip(&selectors) {
            self.registry.add(*selector, target)?;
            info!(%signature, %selector, %target, "entry added");
            self.log.append(Event::EntryAdded {
                selector: *selector,
                target,
            });
        }
        self.check_layout(target);
        Ok(selectors)
    }

    /// Point `selector` at a new `target`.
    pub fn update_entry(
        &mut self,
        caller: Address,
        selector: Selector,
        target: Address,
    ) -> Result<(), DispatchError> {
        self.authorize(Role::Moderator, caller, "updateEntry")?;
        let previous = self.registry.update(selector, target)?;
        self.check_layout(target);
        info!(%selector, %previous, %target, "entry updated");
        self.log.append(Event::EntryUpdated { selector, target });
        Ok(())
    }

    /// Stop routing `selector`.
    pub fn remove_entry(&mut self, caller: Address, selector: Selector) -> Result<(), DispatchError> {
        self.authorize(Role::Moderator, caller, "removeEntry")?;
        let previous = self.registry.remove(selector)?;
        info!(%selector, %previous, "entry removed");
        self.log.append(Event::EntryRemoved { selector });
        Ok(())
    }

    // ------------------------------------------------------------------
    // Roles
    // ------------------------------------------------------------------

    /// Hand the Admin role to `successor`.
    pub fn renounce_admin(&mut self, caller: Address, successor: Address) -> Result<(), DispatchError> {
        self.renounce(Role::Admin, caller, successor)
    }

    /// Hand the Moderator role to `successor`.
    pub fn renounce_moderator(
        &mut self,
        caller: Address,
        successor: Address,
    ) -> Result<(), DispatchError> {
        self.renounce(Role::Moderator, caller, successor)
    }

    fn renounce(&mut self, role: Role, caller: Address, successor: Address) -> Result<(), DispatchError> {
        let (old, new) = self
            .governance
            .transfer(role, caller, successor)
            .inspect_err(|err| warn!(%role, %caller, reason = err.reason(), "role transfer rejected"))?;
        info!(%role, %old, %new, "role transferred");
        self.log.append(Event::role_changed(role, old, new));
        Ok(())
    }

    fn authorize(&self, role: Role, caller: Address, operation: &'static str) -> Result<(), DispatchError> {
        self.governance
            .ensure(role, caller)
            .inspect_err(|_| warn!(%caller, operation, "unauthorized management call"))
    }

    // Shared storage is only safe when backends agree on layout. Flag, never block.
    fn check_layout(&self, target: Address) {
        let Some(schema) = self.backends.schema(target) else {
            warn!(%target, "entry routes to an address with no backend installed");
            return;
        };
        for (_, other) in self.registry.entries() {
            if other == target {
                continue;
            }
            if let Some(theirs) = self.backends.schema(other)
                && theirs.namespace == schema.namespace
            {
                warn!(
                    %target,
                    %other,
                    namespace = schema.namespace,
                    ours = schema.version,
                    theirs = theirs.version,
                    "routed backends share a storage namespace"
                );
                return;
            }
        }
    }

    // ------------------------------------------------------------------
    // Forwarding
    // ------------------------------------------------------------------

    async fn forward(&mut self, call: Call) -> Result<Output, DispatchError> {
        let selector = call.selector();
        let span = tracing::info_span!(
            "forward",
            selector = %selector,
            caller = %call.caller,
            value = call.value
        );
        self.forward_inner(call).instrument(span).await
    }

    async fn forward_inner(&mut self, call: Call) -> Result<Output, DispatchError> {
        let selector = call.selector();
        let target = self.registry.resolve(selector).ok_or_else(|| {
            debug!("no route");
            DispatchError::UnroutableCall(selector)
        })?;
        let backend = self
            .backends
            .get(target)
            .ok_or(DispatchError::MissingBackend(target))?;
        let balance = self
            .balance
            .checked_add(call.value)
            .ok_or_else(|| Revert::new("dispatcher balance overflow"))?;

        debug!(%target, "forwarding");
        let mut ctx = CallContext::new(self.address, target, &call, &self.storage);
        let result = backend.invoke_dyn(&mut ctx).await;
        let journal = ctx.into_journal();

        match result {
            Ok(output) => {
                debug!(
                    writes = journal.writes.len(),
                    logs = journal.logs.len(),
                    "committing"
                );
                self.storage.apply(journal.writes);
                for log in journal.logs {
                    self.log.append(Event::Backend(log));
                }
                self.balance = balance;
                Ok(output)
            }
            Err(revert) => {
                debug!(reason = revert.reason(), "backend reverted");
                Err(revert.into())
            }
        }
    }

    // ------------------------------------------------------------------
    // Backend code
    // ------------------------------------------------------------------

    /// Install `backend` at a fresh address.
    pub fn deploy_backend<B: Backend>(&mut self, backend: B) -> Address {
        let address = self.backends.deploy(backend);
        debug!(%address, "backend installed");
        address
    }

    /// Install an already shared backend at a fresh address.
    pub fn deploy_shared_backend(&mut self, backend: SharedBackend) -> Address {
        let address = self.backends.deploy_shared(backend);
        debug!(%address, "backend installed");
        address
    }

    /// Install `backend` at an empty `address`.
    ///
    /// Installed code is immutable. Changing what a routed selector runs
    /// goes through [`update_entry`](Self::update_entry).
    pub fn install_backend<B: Backend>(
        &mut self,
        address: Address,
        backend: B,
    ) -> Result<(), DispatchError> {
        self.backends
            .install(address, backend)
            .inspect_err(|_| warn!(%address, "refused to replace installed code"))?;
        debug!(%address, "backend installed");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    /// The backend `selector` routes to.
    pub fn resolve(&self, selector: Selector) -> Option<Address> {
        self.registry.resolve(selector)
    }

    /// Current Admin.
    pub fn admin(&self) -> Address {
        self.governance.admin()
    }

    /// Current Moderator.
    pub fn moderator(&self) -> Address {
        self.governance.moderator()
    }

    /// The dispatcher's own address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Value received by committed calls.
    pub fn balance(&self) -> u128 {
        self.balance
    }

    /// Routing entries.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Committed events.
    pub fn events(&self) -> &EventLog {
        &self.log
    }

    /// The storage area backends operate on.
    pub fn storage(&self) -> &StateStore {
        &self.storage
    }

    /// Installed backend code.
    pub fn backends(&self) -> &BackendSet {
        &self.backends
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("address", &self.address)
            .field("governance", &self.governance)
            .field("routes", &self.registry.len())
            .field("slots", &self.storage.len())
            .field("events", &self.log.len())
            .field("balance", &self.balance)
            .finish()
    }
}
