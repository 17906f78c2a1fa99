//! Bounded polling for asynchronous state transitions on the service.
//!
//! A wait sleeps one interval, fetches the resource once, and compares the observed state with
//! the target. It stops at the first match, at the first failed fetch, or at the deadline
//! `start + timeout`, whichever comes first. A fetch still in flight at the deadline is dropped.

use ::std::future::Future;

use ::appmanager_common::{
    anyhow::anyhow,
    config::WaitConfig,
    error::{AppManagerError, Result},
    resource::Stateful,
    tokio::time::{sleep_until, timeout_at, Instant},
    tracing::{debug, info, warn},
};

/// Poll `fetch_current` until the state it reports equals `target_state`.
///
/// `fetch_current` returns a snapshot of the resource together with its current state.
/// Fails with `InvalidState` before any fetch when `is_valid_state(target_state)` is false,
/// with `FailToFetch` on the first failed fetch and with `Timeout` when the deadline passes.
pub async fn wait_state_change<T, V, F, Fut>(
    target_state: &str,
    is_valid_state: V,
    config: &WaitConfig,
    mut fetch_current: F,
) -> Result<T>
where
    V: Fn(&str) -> bool,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(T, String)>>,
{
    if !is_valid_state(target_state) {
        return Err(AppManagerError::invalid_state(anyhow!(
            "use a wrong state: {}",
            target_state
        )));
    }

    let result = poll_until(config, || {
        let fetch = fetch_current();
        async move {
            let (snapshot, state) = fetch.await.map_err(AppManagerError::fail_to_fetch)?;
            debug!("observed state {}, waiting for {}", state, target_state);
            Ok((state == target_state).then_some(snapshot))
        }
    })
    .await;

    match &result {
        Ok(_) => info!("reached state {}", target_state),
        Err(e) => warn!("stop waiting for state {}: {}", target_state, e),
    }
    result
}

/// [wait_state_change] for a resource kind that knows its own states.
pub async fn wait_resource_state<T, F, Fut>(
    target_state: &str,
    config: &WaitConfig,
    mut fetch: F,
) -> Result<T>
where
    T: Stateful,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    wait_state_change(target_state, T::is_valid_state, config, || {
        let fetch = fetch();
        async move {
            let resource = fetch.await?;
            let state = resource.current_state().unwrap_or_default().to_owned();
            Ok((resource, state))
        }
    })
    .await
}

/// Poll `fetch` until the service answers `404 Not Found`.
/// Any other outcome of a fetch, success or failure, keeps the wait going.
pub async fn wait_not_found<T, F, Fut>(config: &WaitConfig, mut fetch: F) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    poll_until(config, || {
        let fetch = fetch();
        async move {
            match fetch.await {
                Err(e) if e.is_not_found() => Ok(Some(())),
                Err(e) => {
                    debug!("resource still reachable: {}", e);
                    Ok(None)
                }
                Ok(_) => Ok(None),
            }
        }
    })
    .await
}

/// Run `check` once per interval until it yields a value, fails, or the deadline passes.
async fn poll_until<R, F, Fut>(config: &WaitConfig, mut check: F) -> Result<R>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<R>>>,
{
    let deadline = Instant::now() + config.timeout();
    loop {
        let next_check = Instant::now() + config.interval();
        if next_check > deadline {
            sleep_until(deadline).await;
            return Err(timeout_error(config));
        }
        sleep_until(next_check).await;

        match timeout_at(deadline, check()).await {
            Ok(Ok(Some(value))) => return Ok(value),
            Ok(Ok(None)) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(timeout_error(config)),
        }
    }
}

fn timeout_error(config: &WaitConfig) -> AppManagerError {
    AppManagerError::timeout(anyhow!("operation timeout after {:?}", config.timeout()))
}
