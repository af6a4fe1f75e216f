//! In-memory repositories for service and router tests.

use super::{
    BuyerRepository, CarrierRepository, EmployeeRepository, InboundOrderRepository,
    LocalityRepository, ProductBatchRepository, ProductRecordRepository, ProductRepository,
    PurchaseOrderRepository, SectionRepository, SellerRepository, WarehouseRepository,
};
use crate::model::*;
use crate::store::Violation;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use sqlx::error::{DatabaseError, ErrorKind};
use std::collections::{BTreeMap, HashMap};
use std::error::Error as StdError;
use std::fmt;
use std::sync::Mutex;

/// A constraint failure shaped like the one PostgreSQL reports through sqlx.
#[derive(Debug)]
pub struct ConstraintError(pub Violation);

impl fmt::Display for ConstraintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} constraint violated", self.0)
    }
}

impl StdError for ConstraintError {}

impl DatabaseError for ConstraintError {
    fn message(&self) -> &str {
        "constraint violated"
    }

    fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
        self
    }

    fn kind(&self) -> ErrorKind {
        match self.0 {
            Violation::Unique => ErrorKind::UniqueViolation,
            Violation::ForeignKey => ErrorKind::ForeignKeyViolation,
        }
    }
}

pub fn violated(violation: Violation) -> sqlx::Error {
    sqlx::Error::Database(Box::new(ConstraintError(violation)))
}

/// Rows keyed by id, ids handed out from 1 like BIGSERIAL.
pub struct Table<T> {
    inner: Mutex<(i64, BTreeMap<i64, T>)>,
    rejection: Mutex<Option<Violation>>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Table {
            inner: Mutex::new((0, BTreeMap::new())),
            rejection: Mutex::new(None),
        }
    }
}

impl<T: Clone> Table<T> {
    /// Rows at exactly `ids`; the next insert continues after the largest one.
    pub fn seeded(ids: &[i64], build: impl Fn(i64) -> T) -> Self {
        let table = Table::default();
        {
            let mut guard = table.inner.lock().unwrap();
            for &id in ids {
                guard.1.insert(id, build(id));
            }
            guard.0 = ids.iter().copied().max().unwrap_or(0);
        }
        table
    }

    /// Fail every later create, update and delete with `violation`.
    pub fn reject_writes(&self, violation: Violation) {
        *self.rejection.lock().unwrap() = Some(violation);
    }

    fn write(&self) -> Result<(), sqlx::Error> {
        match *self.rejection.lock().unwrap() {
            Some(violation) => Err(violated(violation)),
            None => Ok(()),
        }
    }

    pub fn insert(&self, build: impl FnOnce(i64) -> T) -> Result<T, sqlx::Error> {
        self.write()?;
        let mut guard = self.inner.lock().unwrap();
        guard.0 += 1;
        let id = guard.0;
        let row = build(id);
        guard.1.insert(id, row.clone());
        Ok(row)
    }

    pub fn get(&self, id: i64) -> Option<T> {
        self.inner.lock().unwrap().1.get(&id).cloned()
    }

    pub fn all(&self) -> Vec<T> {
        self.inner.lock().unwrap().1.values().cloned().collect()
    }

    pub fn replace(&self, id: i64, row: T) -> Result<Option<T>, sqlx::Error> {
        self.write()?;
        let mut guard = self.inner.lock().unwrap();
        Ok(guard.1.get_mut(&id).map(|slot| {
            *slot = row.clone();
            row
        }))
    }

    pub fn remove(&self, id: i64) -> Result<u64, sqlx::Error> {
        self.write()?;
        Ok(u64::from(self.inner.lock().unwrap().1.remove(&id).is_some()))
    }

    pub fn contains(&self, id: i64) -> bool {
        self.inner.lock().unwrap().1.contains_key(&id)
    }

    pub fn any(&self, predicate: impl Fn(&T) -> bool) -> bool {
        self.inner.lock().unwrap().1.values().any(predicate)
    }

    /// All rows, or only `id` when given.
    fn owners(&self, id: Option<i64>, key: impl Fn(&T) -> i64) -> Vec<T> {
        self.all()
            .into_iter()
            .filter(|row| id.map_or(true, |id| key(row) == id))
            .collect()
    }
}

fn date(value: &str) -> NaiveDate {
    value.parse().unwrap()
}

fn timestamp(value: &str) -> NaiveDateTime {
    value.parse().unwrap()
}

#[derive(Default)]
pub struct MemoryLocalities {
    pub rows: Table<Locality>,
}

impl MemoryLocalities {
    pub fn with_places(places: &[(&str, &str, &str)]) -> Self {
        let ids: Vec<i64> = (1..=places.len() as i64).collect();
        MemoryLocalities {
            rows: Table::seeded(&ids, |id| {
                let (name, province, country) = places[(id - 1) as usize];
                Locality {
                    id,
                    locality_name: name.to_string(),
                    province_name: province.to_string(),
                    country_name: country.to_string(),
                }
            }),
        }
    }
}

#[async_trait]
impl LocalityRepository for MemoryLocalities {
    async fn create(&self, locality: &CreateLocality) -> Result<Locality, sqlx::Error> {
        self.rows.insert(|id| Locality {
            id,
            locality_name: locality.locality_name.clone(),
            province_name: locality.province_name.clone(),
            country_name: locality.country_name.clone(),
        })
    }

    async fn get(&self, id: i64) -> Result<Option<Locality>, sqlx::Error> {
        Ok(self.rows.get(id))
    }

    async fn get_all(&self) -> Result<Vec<Locality>, sqlx::Error> {
        Ok(self.rows.all())
    }

    async fn update(&self, locality: &Locality) -> Result<Option<Locality>, sqlx::Error> {
        self.rows.replace(locality.id, locality.clone())
    }

    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        self.rows.remove(id)
    }

    async fn exists(&self, id: i64) -> Result<bool, sqlx::Error> {
        Ok(self.rows.contains(id))
    }

    async fn exists_place(
        &self,
        locality_name: &str,
        province_name: &str,
        country_name: &str,
    ) -> Result<bool, sqlx::Error> {
        Ok(self.rows.any(|l| {
            l.locality_name == locality_name
                && l.province_name == province_name
                && l.country_name == country_name
        }))
    }

    async fn count_sellers(&self, id: Option<i64>) -> Result<Vec<LocalitySellersReport>, sqlx::Error> {
        Ok(self
            .rows
            .owners(id, |l| l.id)
            .into_iter()
            .map(|l| LocalitySellersReport {
                locality_id: l.id,
                locality_name: l.locality_name,
                sellers_count: 0,
            })
            .collect())
    }

    async fn count_carriers(&self, id: Option<i64>) -> Result<Vec<LocalityCarriersReport>, sqlx::Error> {
        Ok(self
            .rows
            .owners(id, |l| l.id)
            .into_iter()
            .map(|l| LocalityCarriersReport {
                locality_id: l.id,
                locality_name: l.locality_name,
                carriers_count: 0,
            })
            .collect())
    }
}

#[derive(Default)]
pub struct MemorySellers {
    pub rows: Table<Seller>,
}

impl MemorySellers {
    pub fn with_ids(ids: &[i64]) -> Self {
        MemorySellers {
            rows: Table::seeded(ids, |id| Seller {
                id,
                cid: id,
                company_name: format!("Seller {}", id),
                address: "Avenida Paulista, 202".into(),
                telephone: "13997780890".into(),
                locality_id: 1,
            }),
        }
    }
}

#[async_trait]
impl SellerRepository for MemorySellers {
    async fn create(&self, seller: &CreateSeller) -> Result<Seller, sqlx::Error> {
        self.rows.insert(|id| Seller {
            id,
            cid: seller.cid,
            company_name: seller.company_name.clone(),
            address: seller.address.clone(),
            telephone: seller.telephone.clone(),
            locality_id: seller.locality_id,
        })
    }

    async fn get(&self, id: i64) -> Result<Option<Seller>, sqlx::Error> {
        Ok(self.rows.get(id))
    }

    async fn get_all(&self) -> Result<Vec<Seller>, sqlx::Error> {
        Ok(self.rows.all())
    }

    async fn update(&self, seller: &Seller) -> Result<Option<Seller>, sqlx::Error> {
        self.rows.replace(seller.id, seller.clone())
    }

    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        self.rows.remove(id)
    }

    async fn exists(&self, id: i64) -> Result<bool, sqlx::Error> {
        Ok(self.rows.contains(id))
    }

    async fn exists_cid(&self, cid: i64) -> Result<bool, sqlx::Error> {
        Ok(self.rows.any(|s| s.cid == cid))
    }
}

#[derive(Default)]
pub struct MemoryWarehouses {
    pub rows: Table<Warehouse>,
}

impl MemoryWarehouses {
    pub fn with_ids(ids: &[i64]) -> Self {
        MemoryWarehouses {
            rows: Table::seeded(ids, |id| Warehouse {
                id,
                warehouse_code: format!("W{}", id),
                address: "Rua Vergueiro, 1000".into(),
                telephone: "1140028922".into(),
                minimum_capacity: 10,
                minimum_temperature: -5.0,
                locality_id: 1,
            }),
        }
    }
}

#[async_trait]
impl WarehouseRepository for MemoryWarehouses {
    async fn create(&self, warehouse: &CreateWarehouse) -> Result<Warehouse, sqlx::Error> {
        self.rows.insert(|id| Warehouse {
            id,
            warehouse_code: warehouse.warehouse_code.clone(),
            address: warehouse.address.clone(),
            telephone: warehouse.telephone.clone(),
            minimum_capacity: warehouse.minimum_capacity,
            minimum_temperature: warehouse.minimum_temperature,
            locality_id: warehouse.locality_id,
        })
    }

    async fn get(&self, id: i64) -> Result<Option<Warehouse>, sqlx::Error> {
        Ok(self.rows.get(id))
    }

    async fn get_all(&self) -> Result<Vec<Warehouse>, sqlx::Error> {
        Ok(self.rows.all())
    }

    async fn update(&self, warehouse: &Warehouse) -> Result<Option<Warehouse>, sqlx::Error> {
        self.rows.replace(warehouse.id, warehouse.clone())
    }

    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        self.rows.remove(id)
    }

    async fn exists(&self, id: i64) -> Result<bool, sqlx::Error> {
        Ok(self.rows.contains(id))
    }

    async fn exists_code(&self, warehouse_code: &str) -> Result<bool, sqlx::Error> {
        Ok(self.rows.any(|w| w.warehouse_code == warehouse_code))
    }
}

/// Sections plus a fixed number of stored batches per section for the report.
#[derive(Default)]
pub struct MemorySections {
    pub rows: Table<Section>,
    products: HashMap<i64, i64>,
}

impl MemorySections {
    pub fn with_ids(ids: &[i64]) -> Self {
        MemorySections {
            rows: Table::seeded(ids, |id| Section {
                id,
                section_number: id,
                current_temperature: 2.0,
                minimum_temperature: -5.0,
                current_capacity: 10,
                minimum_capacity: 5,
                maximum_capacity: 100,
                warehouse_id: 1,
                product_type_id: 1,
            }),
            products: HashMap::new(),
        }
    }

    pub fn with_products(mut self, section_id: i64, count: i64) -> Self {
        self.products.insert(section_id, count);
        self
    }
}

#[async_trait]
impl SectionRepository for MemorySections {
    async fn create(&self, section: &CreateSection) -> Result<Section, sqlx::Error> {
        self.rows.insert(|id| Section {
            id,
            section_number: section.section_number,
            current_temperature: section.current_temperature,
            minimum_temperature: section.minimum_temperature,
            current_capacity: section.current_capacity,
            minimum_capacity: section.minimum_capacity,
            maximum_capacity: section.maximum_capacity,
            warehouse_id: section.warehouse_id,
            product_type_id: section.product_type_id,
        })
    }

    async fn get(&self, id: i64) -> Result<Option<Section>, sqlx::Error> {
        Ok(self.rows.get(id))
    }

    async fn get_all(&self) -> Result<Vec<Section>, sqlx::Error> {
        Ok(self.rows.all())
    }

    async fn update(&self, section: &Section) -> Result<Option<Section>, sqlx::Error> {
        self.rows.replace(section.id, section.clone())
    }

    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        self.rows.remove(id)
    }

    async fn exists(&self, id: i64) -> Result<bool, sqlx::Error> {
        Ok(self.rows.contains(id))
    }

    async fn exists_number(&self, section_number: i64) -> Result<bool, sqlx::Error> {
        Ok(self.rows.any(|s| s.section_number == section_number))
    }

    async fn count_products(&self, id: Option<i64>) -> Result<Vec<SectionProductsReport>, sqlx::Error> {
        Ok(self
            .rows
            .owners(id, |s| s.id)
            .into_iter()
            .map(|s| SectionProductsReport {
                products_count: self.products.get(&s.id).copied().unwrap_or(0),
                section_id: s.id,
                section_number: s.section_number,
            })
            .collect())
    }
}

/// Products plus a fixed number of price records per product for the report.
#[derive(Default)]
pub struct MemoryProducts {
    pub rows: Table<Product>,
    records: HashMap<i64, i64>,
}

impl MemoryProducts {
    pub fn with_ids(ids: &[i64]) -> Self {
        MemoryProducts {
            rows: Table::seeded(ids, |id| Product {
                id,
                product_code: format!("P{}", id),
                description: format!("Product {}", id),
                width: 1.0,
                height: 1.0,
                length: 1.0,
                net_weight: 1.0,
                expiration_rate: 0.5,
                recommended_freezing_temperature: -18.0,
                freezing_rate: 0.5,
                product_type_id: 1,
                seller_id: 1,
            }),
            records: HashMap::new(),
        }
    }

    pub fn with_records(mut self, product_id: i64, count: i64) -> Self {
        self.records.insert(product_id, count);
        self
    }
}

#[async_trait]
impl ProductRepository for MemoryProducts {
    async fn create(&self, product: &CreateProduct) -> Result<Product, sqlx::Error> {
        self.rows.insert(|id| Product {
            id,
            product_code: product.product_code.clone(),
            description: product.description.clone(),
            width: product.width,
            height: product.height,
            length: product.length,
            net_weight: product.net_weight,
            expiration_rate: product.expiration_rate,
            recommended_freezing_temperature: product.recommended_freezing_temperature,
            freezing_rate: product.freezing_rate,
            product_type_id: product.product_type_id,
            seller_id: product.seller_id,
        })
    }

    async fn get(&self, id: i64) -> Result<Option<Product>, sqlx::Error> {
        Ok(self.rows.get(id))
    }

    async fn get_all(&self) -> Result<Vec<Product>, sqlx::Error> {
        Ok(self.rows.all())
    }

    async fn update(&self, product: &Product) -> Result<Option<Product>, sqlx::Error> {
        self.rows.replace(product.id, product.clone())
    }

    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        self.rows.remove(id)
    }

    async fn exists(&self, id: i64) -> Result<bool, sqlx::Error> {
        Ok(self.rows.contains(id))
    }

    async fn exists_code(&self, product_code: &str) -> Result<bool, sqlx::Error> {
        Ok(self.rows.any(|p| p.product_code == product_code))
    }

    async fn count_records(&self, id: Option<i64>) -> Result<Vec<ProductRecordsReport>, sqlx::Error> {
        Ok(self
            .rows
            .owners(id, |p| p.id)
            .into_iter()
            .map(|p| ProductRecordsReport {
                records_count: self.records.get(&p.id).copied().unwrap_or(0),
                product_id: p.id,
                description: p.description,
            })
            .collect())
    }
}

#[derive(Default)]
pub struct MemoryProductRecords {
    pub rows: Table<ProductRecord>,
}

impl MemoryProductRecords {
    pub fn with_ids(ids: &[i64]) -> Self {
        MemoryProductRecords {
            rows: Table::seeded(ids, |id| ProductRecord {
                id,
                last_update_date: timestamp("2022-04-04T10:00:00"),
                purchase_price: 10.0,
                sale_price: 15.0,
                product_id: 1,
            }),
        }
    }
}

#[async_trait]
impl ProductRecordRepository for MemoryProductRecords {
    async fn create(&self, record: &CreateProductRecord) -> Result<ProductRecord, sqlx::Error> {
        self.rows.insert(|id| ProductRecord {
            id,
            last_update_date: record.last_update_date,
            purchase_price: record.purchase_price,
            sale_price: record.sale_price,
            product_id: record.product_id,
        })
    }

    async fn get(&self, id: i64) -> Result<Option<ProductRecord>, sqlx::Error> {
        Ok(self.rows.get(id))
    }

    async fn get_all(&self) -> Result<Vec<ProductRecord>, sqlx::Error> {
        Ok(self.rows.all())
    }

    async fn update(&self, record: &ProductRecord) -> Result<Option<ProductRecord>, sqlx::Error> {
        self.rows.replace(record.id, record.clone())
    }

    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        self.rows.remove(id)
    }

    async fn exists(&self, id: i64) -> Result<bool, sqlx::Error> {
        Ok(self.rows.contains(id))
    }
}

#[derive(Default)]
pub struct MemoryProductBatches {
    pub rows: Table<ProductBatch>,
}

impl MemoryProductBatches {
    pub fn with_ids(ids: &[i64]) -> Self {
        MemoryProductBatches {
            rows: Table::seeded(ids, |id| ProductBatch {
                id,
                batch_number: id,
                current_quantity: 200,
                current_temperature: 2.0,
                due_date: date("2022-05-04"),
                initial_quantity: 200,
                manufacturing_date: date("2022-04-04"),
                manufacturing_hour: 10,
                minimum_temperature: -5.0,
                product_id: 1,
                section_id: 1,
            }),
        }
    }
}

#[async_trait]
impl ProductBatchRepository for MemoryProductBatches {
    async fn create(&self, batch: &CreateProductBatch) -> Result<ProductBatch, sqlx::Error> {
        self.rows.insert(|id| ProductBatch {
            id,
            batch_number: batch.batch_number,
            current_quantity: batch.current_quantity,
            current_temperature: batch.current_temperature,
            due_date: batch.due_date,
            initial_quantity: batch.initial_quantity,
            manufacturing_date: batch.manufacturing_date,
            manufacturing_hour: batch.manufacturing_hour,
            minimum_temperature: batch.minimum_temperature,
            product_id: batch.product_id,
            section_id: batch.section_id,
        })
    }

    async fn get(&self, id: i64) -> Result<Option<ProductBatch>, sqlx::Error> {
        Ok(self.rows.get(id))
    }

    async fn get_all(&self) -> Result<Vec<ProductBatch>, sqlx::Error> {
        Ok(self.rows.all())
    }

    async fn update(&self, batch: &ProductBatch) -> Result<Option<ProductBatch>, sqlx::Error> {
        self.rows.replace(batch.id, batch.clone())
    }

    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        self.rows.remove(id)
    }

    async fn exists(&self, id: i64) -> Result<bool, sqlx::Error> {
        Ok(self.rows.contains(id))
    }

    async fn exists_number(&self, batch_number: i64) -> Result<bool, sqlx::Error> {
        Ok(self.rows.any(|b| b.batch_number == batch_number))
    }
}

/// Employees plus a fixed number of inbound orders per employee for the report.
#[derive(Default)]
pub struct MemoryEmployees {
    pub rows: Table<Employee>,
    inbound_orders: HashMap<i64, i64>,
}

impl MemoryEmployees {
    pub fn with_ids(ids: &[i64]) -> Self {
        MemoryEmployees {
            rows: Table::seeded(ids, |id| Employee {
                id,
                card_number_id: format!("E{}", id),
                first_name: "Maria".into(),
                last_name: "Silva".into(),
                warehouse_id: 1,
            }),
            inbound_orders: HashMap::new(),
        }
    }

    pub fn with_inbound_orders(mut self, employee_id: i64, count: i64) -> Self {
        self.inbound_orders.insert(employee_id, count);
        self
    }
}

#[async_trait]
impl EmployeeRepository for MemoryEmployees {
    async fn create(&self, employee: &CreateEmployee) -> Result<Employee, sqlx::Error> {
        self.rows.insert(|id| Employee {
            id,
            card_number_id: employee.card_number_id.clone(),
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            warehouse_id: employee.warehouse_id,
        })
    }

    async fn get(&self, id: i64) -> Result<Option<Employee>, sqlx::Error> {
        Ok(self.rows.get(id))
    }

    async fn get_all(&self) -> Result<Vec<Employee>, sqlx::Error> {
        Ok(self.rows.all())
    }

    async fn update(&self, employee: &Employee) -> Result<Option<Employee>, sqlx::Error> {
        self.rows.replace(employee.id, employee.clone())
    }

    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        self.rows.remove(id)
    }

    async fn exists(&self, id: i64) -> Result<bool, sqlx::Error> {
        Ok(self.rows.contains(id))
    }

    async fn exists_card_number(&self, card_number_id: &str) -> Result<bool, sqlx::Error> {
        Ok(self.rows.any(|e| e.card_number_id == card_number_id))
    }

    async fn count_inbound_orders(
        &self,
        id: Option<i64>,
    ) -> Result<Vec<EmployeeInboundOrdersReport>, sqlx::Error> {
        Ok(self
            .rows
            .owners(id, |e| e.id)
            .into_iter()
            .map(|e| EmployeeInboundOrdersReport {
                inbound_orders_count: self.inbound_orders.get(&e.id).copied().unwrap_or(0),
                id: e.id,
                card_number_id: e.card_number_id,
                first_name: e.first_name,
                last_name: e.last_name,
                warehouse_id: e.warehouse_id,
            })
            .collect())
    }
}

#[derive(Default)]
pub struct MemoryInboundOrders {
    pub rows: Table<InboundOrder>,
}

#[async_trait]
impl InboundOrderRepository for MemoryInboundOrders {
    async fn create(&self, order: &CreateInboundOrder) -> Result<InboundOrder, sqlx::Error> {
        self.rows.insert(|id| InboundOrder {
            id,
            order_date: order.order_date,
            order_number: order.order_number.clone(),
            employee_id: order.employee_id,
            product_batch_id: order.product_batch_id,
            warehouse_id: order.warehouse_id,
        })
    }

    async fn get(&self, id: i64) -> Result<Option<InboundOrder>, sqlx::Error> {
        Ok(self.rows.get(id))
    }

    async fn get_all(&self) -> Result<Vec<InboundOrder>, sqlx::Error> {
        Ok(self.rows.all())
    }

    async fn update(&self, order: &InboundOrder) -> Result<Option<InboundOrder>, sqlx::Error> {
        self.rows.replace(order.id, order.clone())
    }

    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        self.rows.remove(id)
    }

    async fn exists_order_number(&self, order_number: &str) -> Result<bool, sqlx::Error> {
        Ok(self.rows.any(|o| o.order_number == order_number))
    }
}

/// Buyers plus a fixed number of purchase orders per buyer for the report.
#[derive(Default)]
pub struct MemoryBuyers {
    pub rows: Table<Buyer>,
    purchase_orders: HashMap<i64, i64>,
}

impl MemoryBuyers {
    pub fn with_ids(ids: &[i64]) -> Self {
        MemoryBuyers {
            rows: Table::seeded(ids, |id| Buyer {
                id,
                card_number_id: format!("B{}", id),
                first_name: "João".into(),
                last_name: "Souza".into(),
            }),
            purchase_orders: HashMap::new(),
        }
    }

    pub fn with_purchase_orders(mut self, buyer_id: i64, count: i64) -> Self {
        self.purchase_orders.insert(buyer_id, count);
        self
    }
}

#[async_trait]
impl BuyerRepository for MemoryBuyers {
    async fn create(&self, buyer: &CreateBuyer) -> Result<Buyer, sqlx::Error> {
        self.rows.insert(|id| Buyer {
            id,
            card_number_id: buyer.card_number_id.clone(),
            first_name: buyer.first_name.clone(),
            last_name: buyer.last_name.clone(),
        })
    }

    async fn get(&self, id: i64) -> Result<Option<Buyer>, sqlx::Error> {
        Ok(self.rows.get(id))
    }

    async fn get_all(&self) -> Result<Vec<Buyer>, sqlx::Error> {
        Ok(self.rows.all())
    }

    async fn update(&self, buyer: &Buyer) -> Result<Option<Buyer>, sqlx::Error> {
        self.rows.replace(buyer.id, buyer.clone())
    }

    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        self.rows.remove(id)
    }

    async fn exists(&self, id: i64) -> Result<bool, sqlx::Error> {
        Ok(self.rows.contains(id))
    }

    async fn exists_card_number(&self, card_number_id: &str) -> Result<bool, sqlx::Error> {
        Ok(self.rows.any(|b| b.card_number_id == card_number_id))
    }

    async fn count_purchase_orders(
        &self,
        id: Option<i64>,
    ) -> Result<Vec<BuyerPurchaseOrdersReport>, sqlx::Error> {
        Ok(self
            .rows
            .owners(id, |b| b.id)
            .into_iter()
            .map(|b| BuyerPurchaseOrdersReport {
                purchase_orders_count: self.purchase_orders.get(&b.id).copied().unwrap_or(0),
                id: b.id,
                card_number_id: b.card_number_id,
                first_name: b.first_name,
                last_name: b.last_name,
            })
            .collect())
    }
}

#[derive(Default)]
pub struct MemoryCarriers {
    pub rows: Table<Carrier>,
}

#[async_trait]
impl CarrierRepository for MemoryCarriers {
    async fn create(&self, carrier: &CreateCarrier) -> Result<Carrier, sqlx::Error> {
        self.rows.insert(|id| Carrier {
            id,
            cid: carrier.cid.clone(),
            company_name: carrier.company_name.clone(),
            address: carrier.address.clone(),
            telephone: carrier.telephone.clone(),
            locality_id: carrier.locality_id,
        })
    }

    async fn get(&self, id: i64) -> Result<Option<Carrier>, sqlx::Error> {
        Ok(self.rows.get(id))
    }

    async fn get_all(&self) -> Result<Vec<Carrier>, sqlx::Error> {
        Ok(self.rows.all())
    }

    async fn update(&self, carrier: &Carrier) -> Result<Option<Carrier>, sqlx::Error> {
        self.rows.replace(carrier.id, carrier.clone())
    }

    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        self.rows.remove(id)
    }

    async fn exists_cid(&self, cid: &str) -> Result<bool, sqlx::Error> {
        Ok(self.rows.any(|c| c.cid == cid))
    }
}

#[derive(Default)]
pub struct MemoryPurchaseOrders {
    pub rows: Table<PurchaseOrder>,
}

#[async_trait]
impl PurchaseOrderRepository for MemoryPurchaseOrders {
    async fn create(&self, order: &CreatePurchaseOrder) -> Result<PurchaseOrder, sqlx::Error> {
        self.rows.insert(|id| PurchaseOrder {
            id,
            order_number: order.order_number.clone(),
            order_date: order.order_date,
            tracking_code: order.tracking_code.clone(),
            buyer_id: order.buyer_id,
            product_record_id: order.product_record_id,
            order_status_id: order.order_status_id,
        })
    }

    async fn get(&self, id: i64) -> Result<Option<PurchaseOrder>, sqlx::Error> {
        Ok(self.rows.get(id))
    }

    async fn get_all(&self) -> Result<Vec<PurchaseOrder>, sqlx::Error> {
        Ok(self.rows.all())
    }

    async fn update(&self, order: &PurchaseOrder) -> Result<Option<PurchaseOrder>, sqlx::Error> {
        self.rows.replace(order.id, order.clone())
    }

    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        self.rows.remove(id)
    }

    async fn exists_order_number(&self, order_number: &str) -> Result<bool, sqlx::Error> {
        Ok(self.rows.any(|o| o.order_number == order_number))
    }
}
