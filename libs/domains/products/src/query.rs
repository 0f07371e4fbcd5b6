//! List query: filter from the path info, sort keys and paging from the
//! query string.
//!
//! The same [`ProductQuery`] drives both repositories. PostgreSQL translates
//! it to SQL; the in-memory repository calls [`ProductQuery::apply`].

use serde::Deserialize;
use std::cmp::Ordering;
use std::str::FromStr;
use strum::{Display, EnumString};

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, UnitOfMeasure};

pub const DEFAULT_PAGE_CAPACITY: u64 = 10;

const MAX_OFFSET: u64 = i64::MAX as u64;

/// Raw query-string parameters of a list request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    /// Repeatable, and each value may be comma separated
    #[serde(default)]
    pub sort: Vec<String>,
    #[serde(rename = "page-number")]
    pub page_number: Option<String>,
    #[serde(rename = "page-capacity")]
    pub page_capacity: Option<String>,
}

/// Single `/{field}/{value}` pair of a filter path
#[derive(Debug, Clone, PartialEq)]
pub enum FilterCondition {
    Id(i32),
    Name(String),
    Price(i32),
    PartNumber(String),
    ManufactureCost(f64),
    UnitOfMeasure(UnitOfMeasure),
    OwnerName(String),
}

impl FilterCondition {
    fn parse(field: &str, value: &str) -> ProductResult<Self> {
        let condition = match field {
            "id" => FilterCondition::Id(parse_value(field, value, "int")?),
            "name" => FilterCondition::Name(value.to_string()),
            "price" => FilterCondition::Price(parse_value(field, value, "int")?),
            "partNumber" => FilterCondition::PartNumber(value.to_string()),
            "manufactureCost" => {
                FilterCondition::ManufactureCost(parse_value(field, value, "double")?)
            }
            "unitOfMeasure" => FilterCondition::UnitOfMeasure(value.parse().map_err(|_| {
                ProductError::InvalidQuery(format!("Unknown unitOfMeasure: {}", value))
            })?),
            "owner" => FilterCondition::OwnerName(value.to_string()),
            other => {
                return Err(ProductError::InvalidQuery(format!(
                    "Unknown filter field: {}",
                    other
                )))
            }
        };
        Ok(condition)
    }

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            FilterCondition::Id(id) => product.id == *id,
            FilterCondition::Name(name) => product.name == *name,
            FilterCondition::Price(price) => product.price == Some(*price),
            FilterCondition::PartNumber(part) => product.part_number.as_deref() == Some(part),
            FilterCondition::ManufactureCost(cost) => product.manufacture_cost == *cost,
            FilterCondition::UnitOfMeasure(unit) => product.unit_of_measure == Some(*unit),
            FilterCondition::OwnerName(name) => {
                product.owner.as_ref().is_some_and(|owner| owner.name == *name)
            }
        }
    }
}

fn parse_value<T: FromStr>(field: &str, value: &str, ty: &str) -> ProductResult<T> {
    value.parse().map_err(|_| ProductError::wrong_type(field, ty))
}

/// Conditions from the path info, combined with AND
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub conditions: Vec<FilterCondition>,
}

impl ProductFilter {
    /// Parse `/{field}/{value}/{field}/{value}…`. Empty segments are skipped.
    pub fn parse(path_info: Option<&str>) -> ProductResult<Self> {
        let segments: Vec<&str> = path_info
            .unwrap_or_default()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        if segments.len() % 2 != 0 {
            return Err(ProductError::InvalidQuery(
                "Filter path must be a sequence of /field/value pairs".to_string(),
            ));
        }

        let conditions = segments
            .chunks_exact(2)
            .map(|pair| FilterCondition::parse(pair[0], pair[1]))
            .collect::<ProductResult<_>>()?;

        Ok(Self { conditions })
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.conditions.iter().all(|c| c.matches(product))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum SortField {
    Id,
    Name,
    CreationDate,
    Price,
    PartNumber,
    ManufactureCost,
    UnitOfMeasure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortKey {
    /// Parse every `sort` value; `-field` sorts descending.
    pub fn parse_all(values: &[String]) -> ProductResult<Vec<Self>> {
        values
            .iter()
            .flat_map(|value| value.split(','))
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(Self::parse)
            .collect()
    }

    fn parse(key: &str) -> ProductResult<Self> {
        let (name, direction) = match key.strip_prefix('-') {
            Some(name) => (name, SortDirection::Desc),
            None => (key, SortDirection::Asc),
        };
        let field = name
            .parse()
            .map_err(|_| ProductError::InvalidQuery(format!("Unknown sort field: {}", name)))?;
        Ok(Self { field, direction })
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let ordering = match self.field {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Name => a.name.cmp(&b.name),
            SortField::CreationDate => a.creation_date.cmp(&b.creation_date),
            SortField::Price => nulls_last(a.price.as_ref(), b.price.as_ref(), Ord::cmp),
            SortField::PartNumber => {
                nulls_last(a.part_number.as_ref(), b.part_number.as_ref(), Ord::cmp)
            }
            SortField::ManufactureCost => a.manufacture_cost.total_cmp(&b.manufacture_cost),
            SortField::UnitOfMeasure => nulls_last(
                a.unit_of_measure.map(|u| u.to_string()).as_ref(),
                b.unit_of_measure.map(|u| u.to_string()).as_ref(),
                Ord::cmp,
            ),
        };
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

// NULL sorts after every value when ascending, like PostgreSQL.
fn nulls_last<T>(a: Option<&T>, b: Option<&T>, cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(a, b),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// 1-based
    pub number: u64,
    pub capacity: u64,
}

impl Page {
    /// `None` when neither parameter is given, meaning no paging.
    pub fn parse(number: Option<&str>, capacity: Option<&str>) -> ProductResult<Option<Self>> {
        if number.is_none() && capacity.is_none() {
            return Ok(None);
        }

        let number = number
            .map(|n| parse_positive("page-number", n))
            .transpose()?
            .unwrap_or(1);
        let capacity = capacity
            .map(|c| parse_positive("page-capacity", c))
            .transpose()?
            .unwrap_or(DEFAULT_PAGE_CAPACITY);

        // OFFSET is a bigint in PostgreSQL
        let in_range = (number - 1)
            .checked_mul(capacity)
            .is_some_and(|offset| offset <= MAX_OFFSET);
        if !in_range {
            return Err(ProductError::InvalidQuery(
                "page-number is too large for page-capacity".to_string(),
            ));
        }

        Ok(Some(Self { number, capacity }))
    }

    /// Rows skipped before this page, capped at `i64::MAX`
    pub fn offset(&self) -> u64 {
        (self.number - 1)
            .saturating_mul(self.capacity)
            .min(MAX_OFFSET)
    }
}

fn parse_positive(param: &str, text: &str) -> ProductResult<u64> {
    let value: i64 = text
        .trim()
        .parse()
        .map_err(|_| ProductError::wrong_type(param, "int"))?;
    if value < 1 {
        return Err(ProductError::InvalidQuery(format!(
            "{} should be greater than 0",
            param
        )));
    }
    Ok(value as u64)
}

/// Everything a list request asks for
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    pub filter: ProductFilter,
    /// Requested keys; `id` ascending is always the final tiebreaker
    pub sort: Vec<SortKey>,
    pub page: Option<Page>,
}

impl ProductQuery {
    pub fn from_request(path_info: Option<&str>, params: &ListParams) -> ProductResult<Self> {
        Ok(Self {
            filter: ProductFilter::parse(path_info)?,
            sort: SortKey::parse_all(&params.sort)?,
            page: Page::parse(params.page_number.as_deref(), params.page_capacity.as_deref())?,
        })
    }

    /// Requested keys followed by `id` ascending unless `id` is already a key
    pub fn effective_sort(&self) -> Vec<SortKey> {
        let mut keys = self.sort.clone();
        if !keys.iter().any(|k| k.field == SortField::Id) {
            keys.push(SortKey {
                field: SortField::Id,
                direction: SortDirection::Asc,
            });
        }
        keys
    }

    /// Filter, sort and page an in-memory collection.
    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        let mut selected: Vec<Product> = products
            .into_iter()
            .filter(|p| self.filter.matches(p))
            .collect();

        let keys = self.effective_sort();
        selected.sort_by(|a, b| {
            keys.iter()
                .map(|key| key.compare(a, b))
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        });

        match self.page {
            Some(page) => selected
                .into_iter()
                .skip(page.offset() as usize)
                .take(page.capacity as usize)
                .collect(),
            None => selected,
        }
    }
}
