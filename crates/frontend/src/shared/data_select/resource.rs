use contracts::shared::data_select::DataSelectQuery;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;

/// Something that can fetch one page of a list for a query.
///
/// `get` only starts the request; the returned value is whatever the caller
/// awaits.
pub trait ListResource {
    type Response;

    fn get(&self, query: &DataSelectQuery) -> Self::Response;
}

impl<T: ListResource + ?Sized> ListResource for &T {
    type Response = T::Response;

    fn get(&self, query: &DataSelectQuery) -> Self::Response {
        (**self).get(query)
    }
}

pub type ListFuture<T> = Pin<Box<dyn Future<Output = Result<T, String>>>>;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListQueryParams<'a> {
    items_per_page: usize,
    page: usize,
    sort_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

/// Build the URL of a list endpoint: `{base}/api/v1/{kind}/{namespace}?{query}`.
/// The namespace segment is left out when the query spans all namespaces.
pub fn list_url(base: &str, kind: &str, query: &DataSelectQuery) -> Result<String, String> {
    let params = ListQueryParams {
        items_per_page: query.items_per_page,
        page: query.page,
        sort_by: query.sort_by.encode(),
        name: query.name.as_deref(),
    };
    let query_string =
        serde_qs::to_string(&params).map_err(|e| format!("Failed to encode query: {}", e))?;

    let mut url = format!("{}/api/v1/{}", base, kind);
    let namespace = query.namespace_or_all();
    if !namespace.is_empty() {
        url.push('/');
        url.push_str(&urlencoding::encode(namespace));
    }
    url.push('?');
    url.push_str(&query_string);
    Ok(url)
}

/// List endpoint of one resource kind, decoded into `T`
pub struct HttpListResource<T> {
    base: String,
    kind: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> HttpListResource<T> {
    pub fn new(base: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            kind: kind.into(),
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for HttpListResource<T> {
    fn clone(&self) -> Self {
        Self::new(self.base.clone(), self.kind.clone())
    }
}

impl<T: DeserializeOwned + 'static> ListResource for HttpListResource<T> {
    type Response = ListFuture<T>;

    fn get(&self, query: &DataSelectQuery) -> Self::Response {
        let url = list_url(&self.base, &self.kind, query);
        Box::pin(async move {
            let url = url?;
            let response = Request::get(&url)
                .send()
                .await
                .map_err(|e| format!("Failed to send request: {}", e))?;

            if !response.ok() {
                return Err(format!("Failed to fetch list: {}", response.status()));
            }

            response
                .json::<T>()
                .await
                .map_err(|e| format!("Failed to parse response: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn params_of(url: &str) -> HashMap<String, String> {
        let (_, query) = url.split_once('?').unwrap();
        serde_qs::from_str(query).unwrap()
    }

    #[test]
    fn test_list_url_with_namespace() {
        let query = DataSelectQuery::builder()
            .namespace(Some("kube-system"))
            .page(2)
            .sort_by("name")
            .ascending(true)
            .build();
        let url = list_url("http://localhost:3000", "pod", &query).unwrap();

        assert!(url.starts_with("http://localhost:3000/api/v1/pod/kube-system?"));
        let params = params_of(&url);
        assert_eq!(params["itemsPerPage"], "10");
        assert_eq!(params["page"], "2");
        assert_eq!(params["sortBy"], "a,name");
        assert!(!params.contains_key("name"));
    }

    #[test]
    fn test_list_url_for_all_namespaces() {
        let query = DataSelectQuery::builder().name(Some("nginx")).build();
        let url = list_url("", "deployment", &query).unwrap();

        assert!(url.starts_with("/api/v1/deployment?"));
        let params = params_of(&url);
        assert_eq!(params["name"], "nginx");
        assert_eq!(params["sortBy"], "d,age");
    }
}
