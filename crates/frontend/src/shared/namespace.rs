//! Выбор пространства имён, общий для всех страниц списков
//!
//! Значение `_all` означает "все пространства имён": реестр data select
//! сбрасывает такой фильтр, а страницы показывают колонку Namespace.

/// Namespace value standing for "all namespaces"
pub const ALL_NAMESPACES_KEY: &str = "_all";

/// Tells whether a namespace value selects more than one namespace
pub trait NamespaceContext {
    fn is_multi_namespace(&self, namespace: &str) -> bool;
}

impl<T: NamespaceContext + ?Sized> NamespaceContext for &T {
    fn is_multi_namespace(&self, namespace: &str) -> bool {
        (**self).is_multi_namespace(namespace)
    }
}

/// Tracks the namespace picked in the namespace selector
#[derive(Debug, Clone)]
pub struct NamespaceService {
    all_namespaces_key: String,
    current: Option<String>,
}

impl NamespaceService {
    pub fn new(all_namespaces_key: impl Into<String>) -> Self {
        Self {
            all_namespaces_key: all_namespaces_key.into(),
            current: None,
        }
    }

    pub fn set_current(&mut self, namespace: Option<String>) {
        self.current = namespace.filter(|ns| !ns.is_empty());
    }

    /// True when the selector shows "all namespaces"
    pub fn is_all_selected(&self) -> bool {
        self.current
            .as_deref()
            .is_some_and(|ns| self.is_multi_namespace(ns))
    }
}

impl Default for NamespaceService {
    fn default() -> Self {
        Self::new(ALL_NAMESPACES_KEY)
    }
}

impl NamespaceContext for NamespaceService {
    fn is_multi_namespace(&self, namespace: &str) -> bool {
        namespace == self.all_namespaces_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_detection() {
        let namespaces = NamespaceService::default();
        assert!(namespaces.is_multi_namespace("_all"));
        assert!(!namespaces.is_multi_namespace("default"));
        assert!(!namespaces.is_multi_namespace(""));
    }

    #[test]
    fn test_custom_wildcard_key() {
        let namespaces = NamespaceService::new("*");
        assert!(namespaces.is_multi_namespace("*"));
        assert!(!namespaces.is_multi_namespace("_all"));
    }

    #[test]
    fn test_current_selection() {
        let mut namespaces = NamespaceService::default();
        assert!(!namespaces.is_all_selected());

        namespaces.set_current(Some("_all".to_string()));
        assert!(namespaces.is_all_selected());

        namespaces.set_current(Some("default".to_string()));
        assert!(!namespaces.is_all_selected());

        namespaces.set_current(None);
        assert!(!namespaces.is_all_selected());
    }
}
