use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use super::{DispatchEvent, DispatchEventKind};

/// Almacenamiento de eventos append-only.
pub trait Journal {
    /// Agrega un evento y lo devuelve completo (con seq y ts).
    fn append_kind(&mut self, run_id: Uuid, kind: DispatchEventKind) -> DispatchEvent;
    /// Eventos de un despacho en orden de seq.
    fn list(&self, run_id: Uuid) -> Vec<DispatchEvent>;
}

#[derive(Default)]
pub struct InMemoryJournal {
    inner: HashMap<Uuid, Vec<DispatchEvent>>,
}

impl Journal for InMemoryJournal {
    fn append_kind(&mut self, run_id: Uuid, kind: DispatchEventKind) -> DispatchEvent {
        let events = self.inner.entry(run_id).or_default();
        let ev = DispatchEvent { seq: events.len() as u64,
                                 run_id,
                                 kind,
                                 ts: Utc::now() };
        events.push(ev.clone());
        ev
    }

    fn list(&self, run_id: Uuid) -> Vec<DispatchEvent> { self.inner.get(&run_id).cloned().unwrap_or_default() }
}
