use serde::Deserialize;

/// Read-only view of the parameters of the current route
pub trait StateParamsSource {
    /// Name of the object a detail page is showing
    fn object_name(&self) -> Option<String>;
    /// Namespace of the object a detail page is showing
    fn object_namespace(&self) -> Option<String>;
    /// Namespace picked for list pages
    fn namespace(&self) -> Option<String>;
}

impl<T: StateParamsSource + ?Sized> StateParamsSource for &T {
    fn object_name(&self) -> Option<String> {
        (**self).object_name()
    }

    fn object_namespace(&self) -> Option<String> {
        (**self).object_namespace()
    }

    fn namespace(&self) -> Option<String> {
        (**self).namespace()
    }
}

/// Route parameters carried in the URL query string,
/// e.g. `?namespace=default&objectName=nginx`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StateParams {
    pub object_name: Option<String>,
    pub object_namespace: Option<String>,
    pub namespace: Option<String>,
}

impl StateParams {
    /// Parse a query string with or without the leading `?`.
    /// Malformed input yields empty params.
    pub fn from_query(search: &str) -> Self {
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default()
    }

    /// Params of the page currently shown in the browser
    pub fn from_location() -> Self {
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        Self::from_query(&search)
    }
}

impl StateParamsSource for StateParams {
    fn object_name(&self) -> Option<String> {
        self.object_name.clone()
    }

    fn object_namespace(&self) -> Option<String> {
        self.object_namespace.clone()
    }

    fn namespace(&self) -> Option<String> {
        self.namespace.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_query() {
        let params = StateParams::from_query("?namespace=kube-system&objectName=coredns");
        assert_eq!(params.namespace.as_deref(), Some("kube-system"));
        assert_eq!(params.object_name.as_deref(), Some("coredns"));
        assert_eq!(params.object_namespace, None);
    }

    #[test]
    fn test_from_empty_query() {
        assert_eq!(StateParams::from_query(""), StateParams::default());
        assert_eq!(StateParams::from_query("?"), StateParams::default());
    }
}
