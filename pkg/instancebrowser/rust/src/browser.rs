// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! View state for the instance browser.
//!
//! The browser has two views: the instance list and the detail view of one
//! instance. The browser decides which reads to make as [`Request`]s; the
//! caller performs them and hands the results back to [`InstanceBrowser::apply`],
//! so that every state write happens on the UI task:
//!
//! ```text
//! LIST --select_instance(ok)--> DETAIL
//! DETAIL --go_home--> LIST (state reset + list re-fetch)
//! ```
//!
//! Failed reads are logged and leave the state untouched. A reset opens a new
//! session; results of reads issued in an older session are dropped when they
//! arrive. Within a session, the detail read that resolves last wins.

use log::{debug, error, info};

use crate::api::InstanceApi;
use crate::errors::FetchError;
use crate::model::{InstanceDetail, InstanceSummary, SeriesPoint};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewState {
    #[default]
    List,
    Detail {
        instance: InstanceDetail,
        /// `None` when the instance has no graph data.
        series: Option<Vec<SeriesPoint>>,
    },
}

impl ViewState {
    pub fn is_list(&self) -> bool {
        matches!(self, ViewState::List)
    }
}

/// Identifies the reset generation a read was issued in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session(u64);

/// A read to issue, tagged with the session it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Instances { session: Session },
    Instance { session: Session, id: String },
}

impl Request {
    /// Perform the read. The result keeps the request's session.
    pub async fn fetch(self, api: &dyn InstanceApi) -> Fetched {
        match self {
            Request::Instances { session } => Fetched::Instances {
                session,
                result: api.list_instances().await,
            },
            Request::Instance { session, id } => {
                let result = api.get_instance(&id).await;
                Fetched::Instance {
                    session,
                    id,
                    result,
                }
            }
        }
    }
}

/// A completed read, tagged with the session that issued it.
#[derive(Debug)]
pub enum Fetched {
    Instances {
        session: Session,
        result: Result<Vec<InstanceSummary>, FetchError>,
    },
    Instance {
        session: Session,
        id: String,
        result: Result<InstanceDetail, FetchError>,
    },
}

#[derive(Debug, Default)]
pub struct InstanceBrowser {
    session: Session,
    instances: Vec<InstanceSummary>,
    view: ViewState,
    /// Highlighted row in the list view.
    cursor: usize,
    /// Highlighted chart point in the detail view.
    point: Option<usize>,
}

impl InstanceBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn instances(&self) -> &[InstanceSummary] {
        &self.instances
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Id of the highlighted list row, if the list has any.
    pub fn highlighted_id(&self) -> Option<&str> {
        self.instances.get(self.cursor).map(|i| i.id.as_str())
    }

    pub fn highlighted_point(&self) -> Option<usize> {
        self.point
    }

    pub fn request_instances(&self) -> Request {
        Request::Instances {
            session: self.session,
        }
    }

    pub fn request_instance(&self, id: &str) -> Request {
        Request::Instance {
            session: self.session,
            id: id.to_string(),
        }
    }

    /// Read for the highlighted list row; `None` while the list is empty.
    pub fn open_highlighted(&self) -> Option<Request> {
        let id = self.highlighted_id()?;
        info!("instance {id} selected");
        Some(self.request_instance(id))
    }

    /// Reset and return the list read for the new session.
    pub fn home(&mut self) -> Request {
        self.reset();
        self.request_instances()
    }

    /// Fetch the instance list and apply it.
    pub async fn load_instances(&mut self, api: &dyn InstanceApi) {
        let fetched = self.request_instances().fetch(api).await;
        self.apply(fetched);
    }

    /// Fetch one instance and, on success, switch to its detail view.
    pub async fn select_instance(&mut self, api: &dyn InstanceApi, id: &str) {
        let fetched = self.request_instance(id).fetch(api).await;
        self.apply(fetched);
    }

    /// Drop all state and fetch the instance list again.
    pub async fn go_home(&mut self, api: &dyn InstanceApi) {
        let fetched = self.home().fetch(api).await;
        self.apply(fetched);
    }

    /// Discard everything and start a new session. Reads still in flight
    /// from the previous session are ignored when they complete.
    pub fn reset(&mut self) {
        let next = Session(self.session.0.wrapping_add(1));
        *self = InstanceBrowser {
            session: next,
            ..InstanceBrowser::default()
        };
        info!("browser reset, session {}", next.0);
    }

    pub fn apply(&mut self, fetched: Fetched) {
        match fetched {
            Fetched::Instances { session, result } => {
                if session != self.session {
                    debug!("dropping instance list from stale session {}", session.0);
                    return;
                }
                match result {
                    Ok(instances) => {
                        info!("loaded {} instance(s)", instances.len());
                        self.instances = instances;
                        self.cursor = self.cursor.min(self.instances.len().saturating_sub(1));
                    }
                    Err(e) => error!("Error fetching instances: {e}"),
                }
            }
            Fetched::Instance {
                session,
                id,
                result,
            } => {
                if session != self.session {
                    debug!("dropping instance {id} from stale session {}", session.0);
                    return;
                }
                match result {
                    Ok(instance) => {
                        let series = instance.series();
                        info!(
                            "showing instance {id} with {} point(s)",
                            series.as_ref().map_or(0, Vec::len)
                        );
                        self.point = series.as_ref().map(|_| 0);
                        self.view = ViewState::Detail { instance, series };
                    }
                    Err(e) if e.is_client_error() => {
                        error!("Error fetching data for instance {id} (client error): {e}")
                    }
                    Err(e) => error!("Error fetching data for instance {id}: {e}"),
                }
            }
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.instances.len() {
            self.cursor += 1;
        }
    }

    pub fn point_prev(&mut self) {
        if let Some(point) = self.point.as_mut() {
            *point = point.saturating_sub(1);
        }
    }

    pub fn point_next(&mut self) {
        let len = match &self.view {
            ViewState::Detail {
                series: Some(series),
                ..
            } => series.len(),
            _ => return,
        };
        if let Some(point) = self.point.as_mut()
            && *point + 1 < len
        {
            *point += 1;
        }
    }
}
