use std::sync::Arc;
use tracing::{info, warn};
use crate::clients::Fetcher;
use crate::config::{default_concurrency, Settings};
use crate::error::{Error, Result};
use crate::models::{AttributeList, ProjectedRecord, RestaurantData, RestaurantId, Table};
use crate::utils::parallel_map_unordered;
use super::{AttributeProjector, Endpoints, IdentifierResolver, RecordLocator};

/// What to scrape: one restaurant, or several independent ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Single(RestaurantId),
    Batch(Vec<RestaurantId>),
}

impl Lookup {
    /// Exactly one identifier is a single lookup; anything else is a batch.
    pub fn from_ids(mut ids: Vec<RestaurantId>) -> Self {
        if ids.len() == 1 {
            Lookup::Single(ids.remove(0))
        } else {
            Lookup::Batch(ids)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Return the raw search record instead of the projection.
    pub full: bool,
    /// Assemble projected records into a [`Table`].
    pub as_table: bool,
}

#[derive(Debug)]
pub struct Failure {
    pub identifier: RestaurantId,
    pub error: Error,
}

/// Outcome of a batch. Order of both lists follows completion, not input.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub results: Vec<RestaurantData>,
    pub failures: Vec<Failure>,
}

impl BatchResult {
    pub fn failed_identifiers(&self) -> Vec<&RestaurantId> {
        self.failures.iter().map(|f| &f.identifier).collect()
    }

    pub fn to_table(&self) -> Result<Table> {
        let records = self.results
            .iter()
            .map(|data| {
                data.as_projected()
                    .ok_or(Error::InvalidOptions("raw records cannot be tabulated"))
            })
            .collect::<Result<Vec<&ProjectedRecord>>>()?;

        Ok(Table::from_records(records))
    }
}

#[derive(Debug)]
pub enum ScrapeOutput {
    Single(RestaurantData),
    Batch(BatchResult),
    Table {
        table: Table,
        failures: Vec<Failure>,
    },
}

pub struct RestaurantScraper {
    resolver: IdentifierResolver,
    locator: RecordLocator,
    projector: AttributeProjector,
    attributes: AttributeList,
    concurrency: usize,
}

impl RestaurantScraper {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        endpoints: Endpoints,
        projector: AttributeProjector,
        attributes: AttributeList,
    ) -> Self {
        Self {
            resolver: IdentifierResolver::new(fetcher.clone(), endpoints.clone()),
            locator: RecordLocator::new(fetcher, endpoints),
            projector,
            attributes,
            concurrency: default_concurrency(),
        }
    }

    pub fn from_settings(
        settings: &Settings,
        fetcher: Arc<dyn Fetcher>,
        attributes: AttributeList,
    ) -> Result<Self> {
        let endpoints = Endpoints::from_config(&settings.api)?;
        let projector = AttributeProjector::new(settings.scraper.hours_entry);

        Ok(Self::new(fetcher, endpoints, projector, attributes)
            .with_concurrency(settings.scraper.effective_concurrency()))
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub fn attributes(&self) -> &AttributeList {
        &self.attributes
    }

    pub async fn fetch_one(&self, id: &RestaurantId, full: bool) -> Result<RestaurantData> {
        let fragment = self.resolver.resolve(id).await?;
        let record = self.locator.locate(id, &fragment).await?;

        info!(identifier = %id, "Located restaurant record");

        if full {
            return Ok(RestaurantData::Raw(record));
        }
        Ok(RestaurantData::Projected(self.projector.project(&record, &self.attributes)))
    }

    /// Scrapes every identifier independently; a failure is recorded and
    /// never stops the others.
    pub async fn fetch_all(&self, ids: &[RestaurantId], full: bool) -> BatchResult {
        info!(
            restaurants = ids.len(),
            concurrency = self.concurrency,
            "Processing restaurant batch"
        );

        let outcomes = parallel_map_unordered(ids.iter().cloned(), self.concurrency, move |id| async move {
            let outcome = self.fetch_one(&id, full).await;
            (id, outcome)
        })
        .await;

        let mut batch = BatchResult::default();
        for (identifier, outcome) in outcomes {
            match outcome {
                Ok(data) => batch.results.push(data),
                Err(error) => {
                    warn!(
                        identifier = %identifier,
                        error = %error,
                        "Failed to scrape restaurant"
                    );
                    batch.failures.push(Failure { identifier, error });
                }
            }
        }

        if !batch.failures.is_empty() {
            let failed: Vec<&str> = batch.failures.iter().map(|f| f.identifier.as_str()).collect();
            warn!(
                ?failed,
                count = failed.len(),
                "Some restaurants could not be resolved"
            );
        }

        info!(
            succeeded = batch.results.len(),
            failed = batch.failures.len(),
            "Finished restaurant batch"
        );

        batch
    }

    pub async fn run(&self, lookup: Lookup, options: FetchOptions) -> Result<ScrapeOutput> {
        if options.full && options.as_table {
            return Err(Error::InvalidOptions("a table needs projected records, not full ones"));
        }

        match lookup {
            Lookup::Single(id) => {
                let data = self.fetch_one(&id, options.full).await?;
                if options.as_table {
                    let batch = BatchResult {
                        results: vec![data],
                        failures: Vec::new(),
                    };
                    return Ok(ScrapeOutput::Table {
                        table: batch.to_table()?,
                        failures: batch.failures,
                    });
                }
                Ok(ScrapeOutput::Single(data))
            }
            Lookup::Batch(ids) => {
                let batch = self.fetch_all(&ids, options.full).await;
                if options.as_table {
                    let table = batch.to_table()?;
                    return Ok(ScrapeOutput::Table {
                        table,
                        failures: batch.failures,
                    });
                }
                Ok(ScrapeOutput::Batch(batch))
            }
        }
    }
}
