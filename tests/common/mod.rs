//! In-memory report stores shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use ksk_reports::adapters::database::traits::{
    HeaderStore, Orchestrator, ReportCatalog, ReportDataSource, ReportRequestStore, ReportStores,
};
use ksk_reports::core::source::DataQuery;
use ksk_reports::domain::{
    CreateReportRequest, HeaderId, Initiator, KskError, PageRequest, ReportError, ReportHeader,
    ReportStatus, ReportType, Result, Row, Username,
};
use serde_json::json;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(day: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
    day.and_hms_opt(h, m, 0).unwrap()
}

pub fn header_id(id: i64) -> HeaderId {
    HeaderId::new(id).unwrap()
}

pub fn user(login: &str) -> Username {
    Username::new(login).unwrap()
}

/// One stored data row and the keys the sources filter on
struct StoredRow {
    source: &'static str,
    report_date: NaiveDate,
    header_id: Option<i64>,
    row: Row,
}

#[derive(Default)]
struct State {
    orchestrators: Vec<Orchestrator>,
    headers: Vec<ReportHeader>,
    rows: Vec<StoredRow>,
    data_queries: Vec<DataQuery>,
    header_lookups: usize,
    enqueued: Vec<HeaderId>,
    failing_sources: HashSet<&'static str>,
    fail_enqueue: bool,
    fail_date_bounds: bool,
    next_id: i64,
}

/// Catalog, header table, data sources and request queue held in memory
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    /// A store whose catalog holds the six known report types
    pub fn with_catalog() -> Self {
        let store = Self::default();
        for (id, code) in [
            (1, "totals"),
            (2, "totals_by_payment_type"),
            (3, "list_totals"),
            (4, "list_totals_by_payment_type"),
            (5, "figurants"),
            (6, "review"),
        ] {
            store.add_orchestrator(id, code);
        }
        store.state.lock().unwrap().next_id = 1000;
        store
    }

    pub fn add_orchestrator(&self, id: i64, code: &str) {
        self.state.lock().unwrap().orchestrators.push(Orchestrator {
            id,
            report_code: code.to_string(),
            name: format!("Report {code}"),
            system_ttl: 30,
            user_ttl: 7,
        });
    }

    fn orchestrator_id(&self, code: &str) -> i64 {
        self.state
            .lock()
            .unwrap()
            .orchestrators
            .iter()
            .find(|o| o.report_code == code)
            .map(|o| o.id)
            .unwrap_or(99)
    }

    /// Insert a header; user headers are owned by `owner`
    pub fn add_header(
        &self,
        id: i64,
        code: &str,
        owner: Option<&str>,
        status: ReportStatus,
        created: NaiveDateTime,
    ) -> HeaderId {
        let orchestrator_id = self.orchestrator_id(code);
        let header = ReportHeader {
            id: header_id(id),
            orchestrator_id,
            report_code: code.to_string(),
            initiator: if owner.is_some() {
                Initiator::User
            } else {
                Initiator::System
            },
            user_login: owner.map(str::to_string),
            status,
            created_datetime: created,
            finished_datetime: status.is_finished().then(|| created + chrono::Duration::minutes(5)),
            start_date: None,
            end_date: None,
            parameters: None,
            error_message: None,
        };
        self.state.lock().unwrap().headers.push(header);
        header_id(id)
    }

    /// Insert `count` rows into `source`, keyed by date and optionally header
    pub fn add_rows(
        &self,
        source: &'static str,
        report_date: NaiveDate,
        header: Option<i64>,
        count: usize,
    ) {
        let mut state = self.state.lock().unwrap();
        for n in 0..count {
            let value = json!({
                "report_header_id": header,
                "report_date": report_date.to_string(),
                "line": n,
            });
            state.rows.push(StoredRow {
                source,
                report_date,
                header_id: header,
                row: Row::from_json_object(value).unwrap(),
            });
        }
    }

    pub fn fail_source(&self, source: &'static str) {
        self.state.lock().unwrap().failing_sources.insert(source);
    }

    pub fn fail_enqueue(&self) {
        self.state.lock().unwrap().fail_enqueue = true;
    }

    pub fn fail_date_bounds(&self) {
        self.state.lock().unwrap().fail_date_bounds = true;
    }

    /// Every data query issued, in order
    pub fn data_queries(&self) -> Vec<DataQuery> {
        self.state.lock().unwrap().data_queries.clone()
    }

    /// Number of system header lookups
    pub fn header_lookups(&self) -> usize {
        self.state.lock().unwrap().header_lookups
    }

    pub fn enqueued(&self) -> Vec<HeaderId> {
        self.state.lock().unwrap().enqueued.clone()
    }

    pub fn header(&self, id: HeaderId) -> Option<ReportHeader> {
        self.state
            .lock()
            .unwrap()
            .headers
            .iter()
            .find(|h| h.id == id)
            .cloned()
    }

    fn matching_rows(state: &State, query: &DataQuery) -> Result<Vec<Row>> {
        let name = query.source().name();
        if state.failing_sources.contains(name) {
            return Err(ReportError::SourceUnavailable {
                source_name: name.to_string(),
                message: "relation does not exist".to_string(),
            }
            .into());
        }

        let rows = state
            .rows
            .iter()
            .filter(|stored| stored.source == name)
            .filter(|stored| match *query {
                DataQuery::TableByDate { date, .. } | DataQuery::FunctionByDate { date, .. } => {
                    stored.report_date == date
                }
                DataQuery::TableByHeader { header_id, .. } => {
                    stored.header_id == Some(header_id.get())
                }
            })
            .map(|stored| stored.row.clone())
            .collect();
        Ok(rows)
    }
}

/// Wrap one store in every role
pub fn stores(store: &Arc<InMemoryStore>) -> ReportStores {
    ReportStores::from_shared(store.clone())
}

#[async_trait]
impl ReportCatalog for InMemoryStore {
    async fn lookup_orchestrator(&self, report_code: &str) -> Result<Option<Orchestrator>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .orchestrators
            .iter()
            .find(|o| o.report_code == report_code)
            .cloned())
    }

    async fn list_report_types(&self) -> Result<Vec<ReportType>> {
        let mut types: Vec<ReportType> = self
            .state
            .lock()
            .unwrap()
            .orchestrators
            .iter()
            .cloned()
            .map(ReportType::from)
            .collect();
        types.sort_by(|a, b| a.report_code.cmp(&b.report_code));
        Ok(types)
    }
}

#[async_trait]
impl HeaderStore for InMemoryStore {
    async fn latest_system_header(
        &self,
        orchestrator_id: i64,
        date: NaiveDate,
    ) -> Result<Option<HeaderId>> {
        let mut state = self.state.lock().unwrap();
        state.header_lookups += 1;
        Ok(state
            .headers
            .iter()
            .filter(|h| {
                h.orchestrator_id == orchestrator_id
                    && h.initiator == Initiator::System
                    && h.status == ReportStatus::Done
                    && h.created_datetime.date() == date
            })
            .max_by_key(|h| h.created_datetime)
            .map(|h| h.id))
    }

    async fn load_header(&self, header_id: HeaderId) -> Result<Option<ReportHeader>> {
        Ok(self.header(header_id))
    }

    async fn system_date_bounds(&self) -> Result<Option<(NaiveDate, NaiveDate)>> {
        let state = self.state.lock().unwrap();
        if state.fail_date_bounds {
            return Err(KskError::Connection("pool timed out".to_string()));
        }
        let dates = state
            .headers
            .iter()
            .filter(|h| h.initiator == Initiator::System && h.status == ReportStatus::Done)
            .map(|h| h.created_datetime.date());
        let min = dates.clone().min();
        let max = dates.max();
        Ok(min.zip(max))
    }

    async fn list_user_headers(
        &self,
        owner: &Username,
        status: Option<ReportStatus>,
        page: PageRequest,
    ) -> Result<(Vec<ReportHeader>, i64)> {
        let state = self.state.lock().unwrap();
        let mut owned: Vec<ReportHeader> = state
            .headers
            .iter()
            .filter(|h| h.initiator == Initiator::User)
            .filter(|h| h.user_login.as_deref() == Some(owner.as_str()))
            .filter(|h| status.map_or(true, |s| h.status == s))
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_datetime.cmp(&a.created_datetime));

        let total = owned.len() as i64;
        let page_rows = owned
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .collect();
        Ok((page_rows, total))
    }
}

#[async_trait]
impl ReportDataSource for InMemoryStore {
    async fn fetch_rows(&self, query: &DataQuery, page: PageRequest) -> Result<Vec<Row>> {
        let mut state = self.state.lock().unwrap();
        state.data_queries.push(*query);
        let rows = Self::matching_rows(&state, query)?;
        Ok(rows
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .collect())
    }

    async fn count_rows(&self, query: &DataQuery) -> Result<i64> {
        let state = self.state.lock().unwrap();
        Ok(Self::matching_rows(&state, query)?.len() as i64)
    }
}

#[async_trait]
impl ReportRequestStore for InMemoryStore {
    async fn create_header(
        &self,
        orchestrator: &Orchestrator,
        owner: &Username,
        request: &CreateReportRequest,
    ) -> Result<ReportHeader> {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let header = ReportHeader {
            id: header_id(state.next_id),
            orchestrator_id: orchestrator.id,
            report_code: orchestrator.report_code.clone(),
            initiator: Initiator::User,
            user_login: Some(owner.to_string()),
            status: ReportStatus::Created,
            created_datetime: at(request.end_date, 12, 0),
            finished_datetime: None,
            start_date: Some(request.start_date),
            end_date: Some(request.end_date),
            parameters: request.parameters.clone(),
            error_message: None,
        };
        state.headers.push(header.clone());
        Ok(header)
    }

    async fn enqueue_processing(&self, header_id: HeaderId) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_enqueue {
            return Err(KskError::Database("NOTIFY failed".to_string()));
        }
        state.enqueued.push(header_id);
        Ok(())
    }

    async fn delete_header(&self, header_id: HeaderId, owner: &Username) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        let before = state.headers.len();
        state.headers.retain(|h| {
            !(h.id == header_id
                && h.initiator == Initiator::User
                && h.user_login.as_deref() == Some(owner.as_str()))
        });
        let deleted = state.headers.len() < before;
        if deleted {
            state.rows.retain(|r| r.header_id != Some(header_id.get()));
        }
        Ok(deleted)
    }
}
