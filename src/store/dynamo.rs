//! DynamoDB-backed item store

use async_trait::async_trait;
use aws_sdk_dynamodb::operation::delete_item::builders::DeleteItemFluentBuilder;
use aws_sdk_dynamodb::operation::get_item::builders::GetItemFluentBuilder;
use aws_sdk_dynamodb::operation::put_item::builders::PutItemFluentBuilder;
use aws_sdk_dynamodb::operation::scan::builders::ScanFluentBuilder;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use std::collections::HashMap;
use std::future::Future;

use super::ItemStore;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::Item;

type Attributes = HashMap<String, AttributeValue>;

/// Item store talking to one DynamoDB table
///
/// The wrapped client is cheap to clone and reuses its connection pool, so
/// one store is built at startup and shared by every invocation.
#[derive(Clone)]
pub struct DynamoStore {
    client: Client,
    table_name: String,
}

impl DynamoStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Build a client from the ambient AWS environment (region, credentials)
    /// honouring the configured endpoint override, e.g. DynamoDB Local.
    pub async fn from_config(config: &Config) -> Self {
        let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let mut builder = aws_sdk_dynamodb::config::Builder::from(&sdk_config);
        if let Some(endpoint) = &config.dynamodb_endpoint {
            tracing::info!("Using DynamoDB endpoint {}", endpoint);
            builder = builder.endpoint_url(endpoint);
        }

        Self::new(Client::from_conf(builder.build()), config.table_name.clone())
    }

    fn key(id: &str) -> AttributeValue {
        AttributeValue::S(id.to_string())
    }

    fn delete_request(&self, id: &str) -> DeleteItemFluentBuilder {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key("id", Self::key(id))
    }

    fn get_request(&self, id: &str) -> GetItemFluentBuilder {
        self.client
            .get_item()
            .table_name(&self.table_name)
            .key("id", Self::key(id))
    }

    fn scan_request(&self, start_key: Option<Attributes>) -> ScanFluentBuilder {
        self.client
            .scan()
            .table_name(&self.table_name)
            .set_exclusive_start_key(start_key)
    }

    fn put_request(&self, item: &Item) -> PutItemFluentBuilder {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item_to_attributes(item)))
    }
}

#[async_trait]
impl ItemStore for DynamoStore {
    async fn delete(&self, id: &str) -> Result<()> {
        self.delete_request(id).send().await?;
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Item>> {
        let output = self.get_request(id).send().await?;
        Ok(output.item().and_then(decode_record))
    }

    async fn scan(&self) -> Result<Vec<Item>> {
        let (items, pages) = collect_pages(|start_key| {
            let request = self.scan_request(start_key);
            async move {
                let output = request.send().await?;
                Ok::<_, Error>(ScanPage {
                    items: output.items().to_vec(),
                    last_evaluated_key: output.last_evaluated_key().cloned(),
                })
            }
        })
        .await?;

        tracing::debug!(pages, count = items.len(), table = %self.table_name, "scan complete");
        Ok(items)
    }

    async fn put(&self, item: Item) -> Result<()> {
        self.put_request(&item).send().await?;
        Ok(())
    }
}

/// One page of a table scan
struct ScanPage {
    items: Vec<Attributes>,
    last_evaluated_key: Option<Attributes>,
}

/// Fetch pages until the table reports no further start key.
/// Returns the decoded items and the number of pages read.
async fn collect_pages<F, Fut>(mut fetch: F) -> Result<(Vec<Item>, usize)>
where
    F: FnMut(Option<Attributes>) -> Fut,
    Fut: Future<Output = Result<ScanPage>>,
{
    let mut items = Vec::new();
    let mut start_key = None;
    let mut pages = 0usize;

    loop {
        let page = fetch(start_key.take()).await?;
        pages += 1;
        items.extend(page.items.iter().filter_map(decode_record));

        match page.last_evaluated_key {
            Some(key) if !key.is_empty() => start_key = Some(key),
            _ => break,
        }
    }

    Ok((items, pages))
}

/// Marshal an item into DynamoDB attribute values
pub fn item_to_attributes(item: &Item) -> Attributes {
    let mut attrs = HashMap::with_capacity(3);
    attrs.insert("id".to_string(), AttributeValue::S(item.id.clone()));
    attrs.insert("name".to_string(), AttributeValue::S(item.name.clone()));
    attrs.insert("price".to_string(), AttributeValue::N(item.price.to_string()));
    attrs
}

/// Unmarshal a stored record
///
/// `price` is accepted as a number attribute or as a string holding a
/// number, which is how untyped writers store it.
pub fn item_from_attributes(attrs: &Attributes) -> Result<Item> {
    let id = string_attribute(attrs, "id")?;
    let name = string_attribute(attrs, "name")?;
    let price = match attrs.get("price") {
        Some(AttributeValue::N(raw)) | Some(AttributeValue::S(raw)) => raw
            .trim()
            .parse::<serde_json::Number>()
            .map_err(|_| Error::Store(format!("item {}: price {:?} is not a number", id, raw)))?,
        Some(_) => return Err(Error::Store(format!("item {}: price is not a number attribute", id))),
        None => return Err(Error::Store(format!("item {}: missing attribute price", id))),
    };

    Ok(Item { id, name, price })
}

/// Records that do not form an item are skipped so one bad row cannot fail a read
fn decode_record(attrs: &Attributes) -> Option<Item> {
    match item_from_attributes(attrs) {
        Ok(item) => Some(item),
        Err(e) => {
            tracing::warn!("Skipping unreadable record: {}", e);
            None
        }
    }
}

fn string_attribute(attrs: &Attributes, name: &str) -> Result<String> {
    match attrs.get(name) {
        Some(AttributeValue::S(value)) => Ok(value.clone()),
        Some(_) => Err(Error::Store(format!("attribute {} is not a string", name))),
        None => Err(Error::Store(format!("missing attribute {}", name))),
    }
}
