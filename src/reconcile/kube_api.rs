//! The slice of the Kubernetes API surface the base reconciler needs,
//! behind a trait so the pipeline in [`super`] is unit-testable without a
//! live apiserver — grounded on the `akri-agent` controller's
//! `DiscoveryConfigurationKubeClient` pattern (a trait wrapping `kube::Api`,
//! mocked with `mockall` in its own tests).

use k8s_openapi::NamespaceResourceScope;
use kube::api::{Patch, PatchParams};
use kube::{Client, Resource, ResourceExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::marker::PhantomData;

use crate::descriptor::status::EntityStatus;
use crate::error::Error;

/// Field manager used for status patches; also doubles as the finalizer
/// token installed by [`super::controllers`] (spec §4.4 step 3).
pub const FIELD_MANAGER: &str = "hass-crds-controller";

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait KubeApi<K>: Send + Sync
where
    K: Clone + Send + Sync + 'static,
{
    /// Looks up a resource by coordinates. `Ok(None)` means not-found,
    /// distinct from a propagating fetch error (spec §4.4 step 1).
    async fn get(&self, namespace: &str, name: &str) -> Result<Option<K>, Error>;

    /// Server-side-applies a new status subresource (spec §4.4 steps 5-6).
    async fn patch_status(&self, namespace: &str, name: &str, status: &EntityStatus) -> Result<(), Error>;

    /// Lists every descriptor of this kind across all namespaces, returning
    /// `(namespace, name)` pairs (spec §4.7 step 4's expected-set
    /// construction). A listing error here is what marks a component
    /// "unverified" for that sweep cycle.
    async fn list_all(&self) -> Result<Vec<(String, String)>, Error>;
}

/// The live implementation, a thin wrapper over `kube::Api<K>` constructed
/// per-namespace on each call (descriptors of one kind can live in any
/// namespace, so no single `Api<K>` can be cached up front).
#[derive(Clone)]
pub struct LiveKubeApi<K> {
    client: Client,
    _marker: PhantomData<fn() -> K>,
}

impl<K> LiveKubeApi<K> {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            _marker: PhantomData,
        }
    }
}

#[async_trait::async_trait]
impl<K> KubeApi<K> for LiveKubeApi<K>
where
    K: Resource<Scope = NamespaceResourceScope>
        + Clone
        + DeserializeOwned
        + Serialize
        + Debug
        + Send
        + Sync
        + 'static,
    K::DynamicType: Default,
{
    async fn get(&self, namespace: &str, name: &str) -> Result<Option<K>, Error> {
        let api: kube::Api<K> = kube::Api::namespaced(self.client.clone(), namespace);
        api.get_opt(name).await.map_err(Error::from)
    }

    async fn patch_status(&self, namespace: &str, name: &str, status: &EntityStatus) -> Result<(), Error> {
        let api: kube::Api<K> = kube::Api::namespaced(self.client.clone(), namespace);
        let patch = serde_json::json!({ "status": status });
        api.patch_status(
            name,
            &PatchParams::apply(FIELD_MANAGER),
            &Patch::Merge(patch),
        )
        .await
        .map_err(Error::StatusWriteFailed)?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<(String, String)>, Error> {
        let api: kube::Api<K> = kube::Api::all(self.client.clone());
        let list = api.list(&Default::default()).await.map_err(|source| Error::ListFailed {
            kind: K::kind(&K::DynamicType::default()).to_string(),
            source,
        })?;
        Ok(list
            .into_iter()
            .map(|obj| {
                let namespace = obj.meta().namespace.clone().unwrap_or_default();
                let name = obj.name_any();
                (namespace, name)
            })
            .collect())
    }
}
