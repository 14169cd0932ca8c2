//! Pestañas sincronizadas con un fragmento de URL.
//!
//! `TabSet` es estado puro; el fragmento (`#agreements`) es un almacén
//! externo detrás de `FragmentStore`. `FragmentSync` los mantiene alineados en
//! ambas direcciones sin depender de un navegador.
use log::debug;

use crate::AdapterError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSet {
    tabs: Vec<String>,
    current: usize,
}

impl TabSet {
    pub fn new<I, S>(tabs: I) -> Result<Self, AdapterError>
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        let tabs: Vec<String> = tabs.into_iter().map(Into::into).collect();
        if tabs.is_empty() {
            return Err(AdapterError::EmptyTabSet);
        }
        Ok(Self { tabs, current: 0 })
    }

    pub fn tabs(&self) -> &[String] {
        &self.tabs
    }

    pub fn current_tab(&self) -> &str {
        &self.tabs[self.current]
    }

    pub fn contains(&self, tab: &str) -> bool {
        self.tabs.iter().any(|t| t == tab)
    }

    /// Activa `tab`. Devuelve `true` si cambió la pestaña activa.
    pub fn set_tab(&mut self, tab: &str) -> Result<bool, AdapterError> {
        let pos = self.tabs
                      .iter()
                      .position(|t| t == tab)
                      .ok_or_else(|| AdapterError::UnknownTab(tab.to_string()))?;
        let changed = pos != self.current;
        self.current = pos;
        Ok(changed)
    }
}

pub trait FragmentStore {
    /// Fragmento actual sin `#`, si lo hay.
    fn read(&self) -> Option<String>;

    fn write(&mut self, fragment: &str);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryFragment {
    value: Option<String>,
}

impl MemoryFragment {
    pub fn new(initial: Option<&str>) -> Self {
        Self { value: initial.map(|v| v.trim_start_matches('#').to_string()) }
    }
}

impl FragmentStore for MemoryFragment {
    fn read(&self) -> Option<String> {
        self.value.clone().filter(|v| !v.is_empty())
    }

    fn write(&mut self, fragment: &str) {
        self.value = Some(fragment.trim_start_matches('#').to_string());
    }
}

pub struct FragmentSync<F: FragmentStore> {
    tabs: TabSet,
    fragment: F,
}

impl<F: FragmentStore> FragmentSync<F> {
    /// Crea el adaptador y aplica el fragmento inicial (enlace compartido).
    pub fn new(tabs: TabSet, fragment: F) -> Self {
        let mut sync = Self { tabs, fragment };
        sync.pull();
        sync
    }

    pub fn tabs(&self) -> &TabSet {
        &self.tabs
    }

    pub fn fragment(&self) -> &F {
        &self.fragment
    }

    pub fn current_tab(&self) -> &str {
        self.tabs.current_tab()
    }

    /// Fragmento → pestaña. Los fragmentos desconocidos se ignoran.
    pub fn pull(&mut self) -> bool {
        let Some(fragment) = self.fragment.read() else {
            return false;
        };
        match self.tabs.set_tab(&fragment) {
            Ok(changed) => changed,
            Err(e) => {
                debug!("ignoring fragment: {}", e);
                false
            }
        }
    }

    /// Pestaña → fragmento.
    pub fn select(&mut self, tab: &str) -> Result<(), AdapterError> {
        self.tabs.set_tab(tab)?;
        self.fragment.write(tab);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tabs() -> TabSet {
        TabSet::new(["overview", "agreements", "courses"]).unwrap()
    }

    #[test]
    fn initial_fragment_selects_tab() {
        let sync = FragmentSync::new(tabs(), MemoryFragment::new(Some("#courses")));
        assert_eq!(sync.current_tab(), "courses");
    }

    #[test]
    fn unknown_fragment_keeps_current_tab() {
        let mut sync = FragmentSync::new(tabs(), MemoryFragment::new(Some("#nope")));
        assert_eq!(sync.current_tab(), "overview");
        assert!(!sync.pull());
    }

    #[test]
    fn select_writes_fragment_and_rejects_unknown_tabs() {
        let mut sync = FragmentSync::new(tabs(), MemoryFragment::default());
        sync.select("agreements").unwrap();
        assert_eq!(sync.fragment().read().as_deref(), Some("agreements"));
        assert_eq!(sync.select("missing"), Err(AdapterError::UnknownTab("missing".into())));
        assert_eq!(sync.current_tab(), "agreements");
    }

    #[test]
    fn empty_tab_set_is_rejected() {
        assert_eq!(TabSet::new(Vec::<String>::new()), Err(AdapterError::EmptyTabSet));
    }
}
