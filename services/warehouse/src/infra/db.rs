use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait,
    LoaderTrait, QueryFilter, QueryOrder, QueryTrait, Select, SqlErr, TransactionError,
    TransactionTrait,
    sea_query::Expr,
};
use sea_orm_migration::MigratorTrait as _;

use warehouse_core::sea_ext::Windowed as _;
use warehouse_domain::pagination::Pagination;
use warehouse_migration::Migrator;
use warehouse_schema::{items, order_items, orders, roles, trucks, users};

use crate::config::WarehouseConfig;
use crate::domain::repository::{
    ItemRepository, OrderRepository, Repositories, Repository, RoleRepository, TruckRepository,
    UserRepository,
};
use crate::domain::types::{Item, Order, OrderItem, Role, Truck, User};
use crate::error::{Resource, WarehouseServiceError};

// ── Connection ───────────────────────────────────────────────────────────────

/// Connect, create the configured schema if needed, and run migrations.
pub async fn connect(config: &WarehouseConfig) -> anyhow::Result<DatabaseConnection> {
    let schema = quote_ident(&config.table_prefix);
    let url = config.database_url()?;

    let bootstrap = Database::connect(url.as_str())
        .await
        .context("connect to database")?;
    bootstrap
        .execute_unprepared(&format!("CREATE SCHEMA IF NOT EXISTS {schema}"))
        .await
        .context("create schema")?;
    bootstrap.close().await.context("close bootstrap connection")?;

    let mut options = ConnectOptions::new(url);
    options
        .set_schema_search_path(schema)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .context("connect to database")?;

    Migrator::up(&db, None).await.context("run migrations")?;
    tracing::info!(schema = %config.table_prefix, "database ready");
    Ok(db)
}

fn quote_ident(raw: &str) -> String {
    format!("\"{}\"", raw.replace('"', "\"\""))
}

/// Hands out one repository per table over a shared pool.
#[derive(Clone)]
pub struct DbRepositories {
    pub db: DatabaseConnection,
}

impl DbRepositories {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl Repositories for DbRepositories {
    type Users = DbUserRepository;
    type Roles = DbRoleRepository;
    type Items = DbItemRepository;
    type Trucks = DbTruckRepository;
    type Orders = DbOrderRepository;

    fn users(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    fn roles(&self) -> DbRoleRepository {
        DbRoleRepository {
            db: self.db.clone(),
        }
    }

    fn items(&self) -> DbItemRepository {
        DbItemRepository {
            db: self.db.clone(),
        }
    }

    fn trucks(&self) -> DbTruckRepository {
        DbTruckRepository {
            db: self.db.clone(),
        }
    }

    fn orders(&self) -> DbOrderRepository {
        DbOrderRepository {
            db: self.db.clone(),
        }
    }

    async fn ping(&self) -> bool {
        self.db.ping().await.is_ok()
    }
}

// ── Error classification ─────────────────────────────────────────────────────

fn classify(resource: Resource, context: &'static str, err: DbErr) -> WarehouseServiceError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            return WarehouseServiceError::DuplicateKey(resource);
        }
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            return WarehouseServiceError::BadRequest(format!(
                "{resource} references a missing record"
            ));
        }
        _ => {}
    }
    match err {
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => {
            WarehouseServiceError::NotFound(resource)
        }
        other => WarehouseServiceError::Storage(anyhow::Error::new(other).context(context)),
    }
}

fn store_err(
    resource: Resource,
    context: &'static str,
) -> impl FnOnce(DbErr) -> WarehouseServiceError {
    move |err| classify(resource, context, err)
}

fn txn_err(
    resource: Resource,
    context: &'static str,
) -> impl FnOnce(TransactionError<DbErr>) -> WarehouseServiceError {
    move |err| match err {
        TransactionError::Connection(e) | TransactionError::Transaction(e) => {
            classify(resource, context, e)
        }
    }
}

/// Stamp `deleted_at` on one live row and return how many rows changed.
async fn soft_delete<E, C>(
    db: &C,
    id_col: E::Column,
    deleted_col: E::Column,
    id: i32,
    now: DateTime<Utc>,
) -> Result<u64, DbErr>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let result = E::update_many()
        .col_expr(deleted_col, Expr::value(now))
        .filter(id_col.eq(id))
        .filter(deleted_col.is_null())
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Stamp `deleted_at` on the order's live lines whose id is not in `keep`.
async fn soft_delete_lines<C: ConnectionTrait>(
    db: &C,
    order_id: i32,
    now: DateTime<Utc>,
    keep: &[i32],
) -> Result<u64, DbErr> {
    let result = order_items::Entity::update_many()
        .col_expr(order_items::Column::DeletedAt, Expr::value(now))
        .filter(order_items::Column::OrderId.eq(order_id))
        .filter(order_items::Column::DeletedAt.is_null())
        .apply_if((!keep.is_empty()).then_some(keep), |query, keep| {
            query.filter(order_items::Column::Id.is_not_in(keep.iter().copied()))
        })
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl Repository<User> for DbUserRepository {
    async fn find_all(&self, page: Pagination) -> Result<Vec<User>, WarehouseServiceError> {
        let models = users::Entity::find()
            .filter(users::Column::DeletedAt.is_null())
            .order_by_asc(users::Column::Id)
            .windowed(page)
            .all(&self.db)
            .await
            .map_err(store_err(Resource::User, "list users"))?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, WarehouseServiceError> {
        let model = users::Entity::find_by_id(id)
            .filter(users::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(store_err(Resource::User, "find user by id"))?;
        Ok(model.map(user_from_model))
    }

    async fn save(&self, user: &User) -> Result<User, WarehouseServiceError> {
        let now = Utc::now();
        let model = users::ActiveModel {
            id: NotSet,
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            username: Set(user.username.clone()),
            password: Set(user.password.clone()),
            role_id: Set(user.role_id),
        }
        .insert(&self.db)
        .await
        .map_err(store_err(Resource::User, "insert user"))?;
        Ok(user_from_model(model))
    }

    async fn update(&self, user: &User) -> Result<User, WarehouseServiceError> {
        let model = users::Entity::update(users::ActiveModel {
            id: Set(user.id),
            updated_at: Set(Utc::now()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            username: Set(user.username.clone()),
            password: Set(user.password.clone()),
            role_id: Set(user.role_id),
            ..Default::default()
        })
        .filter(users::Column::DeletedAt.is_null())
        .exec(&self.db)
        .await
        .map_err(store_err(Resource::User, "update user"))?;
        Ok(user_from_model(model))
    }

    async fn delete(&self, user: &User) -> Result<(), WarehouseServiceError> {
        let affected = soft_delete::<users::Entity, _>(
            &self.db,
            users::Column::Id,
            users::Column::DeletedAt,
            user.id,
            Utc::now(),
        )
        .await
        .map_err(store_err(Resource::User, "delete user"))?;
        if affected == 0 {
            return Err(WarehouseServiceError::NotFound(Resource::User));
        }
        Ok(())
    }
}

impl UserRepository for DbUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, WarehouseServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .filter(users::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(store_err(Resource::User, "find user by username"))?;
        Ok(model.map(user_from_model))
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        first_name: model.first_name,
        last_name: model.last_name,
        username: model.username,
        password: model.password,
        role_id: model.role_id,
    }
}

// ── Role repository ──────────────────────────────────────────────────────────

/// Roles have no audit columns and are deleted outright.
#[derive(Clone)]
pub struct DbRoleRepository {
    pub db: DatabaseConnection,
}

impl Repository<Role> for DbRoleRepository {
    async fn find_all(&self, page: Pagination) -> Result<Vec<Role>, WarehouseServiceError> {
        let models = roles::Entity::find()
            .order_by_asc(roles::Column::Id)
            .windowed(page)
            .all(&self.db)
            .await
            .map_err(store_err(Resource::Role, "list roles"))?;
        Ok(models.into_iter().map(role_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Role>, WarehouseServiceError> {
        let model = roles::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(store_err(Resource::Role, "find role by id"))?;
        Ok(model.map(role_from_model))
    }

    async fn save(&self, role: &Role) -> Result<Role, WarehouseServiceError> {
        let model = roles::ActiveModel {
            id: Set(role.id),
            name: Set(role.name.clone()),
        }
        .insert(&self.db)
        .await
        .map_err(store_err(Resource::Role, "insert role"))?;
        Ok(role_from_model(model))
    }

    async fn update(&self, role: &Role) -> Result<Role, WarehouseServiceError> {
        let model = roles::Entity::update(roles::ActiveModel {
            id: Set(role.id),
            name: Set(role.name.clone()),
        })
        .exec(&self.db)
        .await
        .map_err(store_err(Resource::Role, "update role"))?;
        Ok(role_from_model(model))
    }

    async fn delete(&self, role: &Role) -> Result<(), WarehouseServiceError> {
        let result = roles::Entity::delete_by_id(role.id)
            .exec(&self.db)
            .await
            .map_err(store_err(Resource::Role, "delete role"))?;
        if result.rows_affected == 0 {
            return Err(WarehouseServiceError::NotFound(Resource::Role));
        }
        Ok(())
    }
}

impl RoleRepository for DbRoleRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, WarehouseServiceError> {
        let model = roles::Entity::find()
            .filter(roles::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(store_err(Resource::Role, "find role by name"))?;
        Ok(model.map(role_from_model))
    }
}

fn role_from_model(model: roles::Model) -> Role {
    Role {
        id: model.id,
        name: model.name,
    }
}

// ── Item repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbItemRepository {
    pub db: DatabaseConnection,
}

impl Repository<Item> for DbItemRepository {
    async fn find_all(&self, page: Pagination) -> Result<Vec<Item>, WarehouseServiceError> {
        let models = items::Entity::find()
            .filter(items::Column::DeletedAt.is_null())
            .order_by_asc(items::Column::Id)
            .windowed(page)
            .all(&self.db)
            .await
            .map_err(store_err(Resource::Item, "list items"))?;
        Ok(models.into_iter().map(item_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Item>, WarehouseServiceError> {
        let model = items::Entity::find_by_id(id)
            .filter(items::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(store_err(Resource::Item, "find item by id"))?;
        Ok(model.map(item_from_model))
    }

    async fn save(&self, item: &Item) -> Result<Item, WarehouseServiceError> {
        let now = Utc::now();
        let model = items::ActiveModel {
            id: NotSet,
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            name: Set(item.name.clone()),
            description: Set(item.description.clone()),
            code: Set(item.code.clone()),
            total_quantity: Set(item.total_quantity),
            available_quantity: Set(item.available_quantity),
            price: Set(item.price),
            category: Set(item.category.clone()),
        }
        .insert(&self.db)
        .await
        .map_err(store_err(Resource::Item, "insert item"))?;
        Ok(item_from_model(model))
    }

    async fn update(&self, item: &Item) -> Result<Item, WarehouseServiceError> {
        let model = items::Entity::update(items::ActiveModel {
            id: Set(item.id),
            updated_at: Set(Utc::now()),
            name: Set(item.name.clone()),
            description: Set(item.description.clone()),
            code: Set(item.code.clone()),
            total_quantity: Set(item.total_quantity),
            available_quantity: Set(item.available_quantity),
            price: Set(item.price),
            category: Set(item.category.clone()),
            ..Default::default()
        })
        .filter(items::Column::DeletedAt.is_null())
        .exec(&self.db)
        .await
        .map_err(store_err(Resource::Item, "update item"))?;
        Ok(item_from_model(model))
    }

    async fn delete(&self, item: &Item) -> Result<(), WarehouseServiceError> {
        let affected = soft_delete::<items::Entity, _>(
            &self.db,
            items::Column::Id,
            items::Column::DeletedAt,
            item.id,
            Utc::now(),
        )
        .await
        .map_err(store_err(Resource::Item, "delete item"))?;
        if affected == 0 {
            return Err(WarehouseServiceError::NotFound(Resource::Item));
        }
        Ok(())
    }
}

impl ItemRepository for DbItemRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Item>, WarehouseServiceError> {
        let model = items::Entity::find()
            .filter(items::Column::Name.eq(name))
            .filter(items::Column::DeletedAt.is_null())
            .order_by_asc(items::Column::Id)
            .one(&self.db)
            .await
            .map_err(store_err(Resource::Item, "find item by name"))?;
        Ok(model.map(item_from_model))
    }
}

fn item_from_model(model: items::Model) -> Item {
    Item {
        id: model.id,
        name: model.name,
        description: model.description,
        code: model.code,
        total_quantity: model.total_quantity,
        available_quantity: model.available_quantity,
        price: model.price,
        category: model.category,
    }
}

// ── Truck repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTruckRepository {
    pub db: DatabaseConnection,
}

impl Repository<Truck> for DbTruckRepository {
    async fn find_all(&self, page: Pagination) -> Result<Vec<Truck>, WarehouseServiceError> {
        let models = trucks::Entity::find()
            .filter(trucks::Column::DeletedAt.is_null())
            .order_by_asc(trucks::Column::Id)
            .windowed(page)
            .all(&self.db)
            .await
            .map_err(store_err(Resource::Truck, "list trucks"))?;
        Ok(models.into_iter().map(truck_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Truck>, WarehouseServiceError> {
        let model = trucks::Entity::find_by_id(id)
            .filter(trucks::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(store_err(Resource::Truck, "find truck by id"))?;
        Ok(model.map(truck_from_model))
    }

    async fn save(&self, truck: &Truck) -> Result<Truck, WarehouseServiceError> {
        let now = Utc::now();
        let model = trucks::ActiveModel {
            id: NotSet,
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            chassis_number: Set(truck.chassis_number.clone()),
            license_plate: Set(truck.license_plate.clone()),
        }
        .insert(&self.db)
        .await
        .map_err(store_err(Resource::Truck, "insert truck"))?;
        Ok(truck_from_model(model))
    }

    async fn update(&self, truck: &Truck) -> Result<Truck, WarehouseServiceError> {
        let model = trucks::Entity::update(trucks::ActiveModel {
            id: Set(truck.id),
            updated_at: Set(Utc::now()),
            chassis_number: Set(truck.chassis_number.clone()),
            license_plate: Set(truck.license_plate.clone()),
            ..Default::default()
        })
        .filter(trucks::Column::DeletedAt.is_null())
        .exec(&self.db)
        .await
        .map_err(store_err(Resource::Truck, "update truck"))?;
        Ok(truck_from_model(model))
    }

    async fn delete(&self, truck: &Truck) -> Result<(), WarehouseServiceError> {
        let affected = soft_delete::<trucks::Entity, _>(
            &self.db,
            trucks::Column::Id,
            trucks::Column::DeletedAt,
            truck.id,
            Utc::now(),
        )
        .await
        .map_err(store_err(Resource::Truck, "delete truck"))?;
        if affected == 0 {
            return Err(WarehouseServiceError::NotFound(Resource::Truck));
        }
        Ok(())
    }
}

impl TruckRepository for DbTruckRepository {}

fn truck_from_model(model: trucks::Model) -> Truck {
    Truck {
        id: model.id,
        chassis_number: model.chassis_number,
        license_plate: model.license_plate,
    }
}

// ── Order repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOrderRepository {
    pub db: DatabaseConnection,
}

fn live_lines() -> Select<order_items::Entity> {
    order_items::Entity::find()
        .filter(order_items::Column::DeletedAt.is_null())
        .order_by_asc(order_items::Column::Id)
}

async fn insert_lines<C: ConnectionTrait>(
    db: &C,
    order_id: i32,
    lines: &[OrderItem],
    now: DateTime<Utc>,
) -> Result<Vec<order_items::Model>, DbErr> {
    if lines.is_empty() {
        return Ok(Vec::new());
    }
    order_items::Entity::insert_many(lines.iter().map(|line| order_items::ActiveModel {
        id: NotSet,
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
        item_id: Set(line.item_id),
        order_id: Set(Some(order_id)),
        quantity: Set(line.quantity),
    }))
    .exec_with_returning_many(db)
    .await
}

impl Repository<Order> for DbOrderRepository {
    async fn find_all(&self, page: Pagination) -> Result<Vec<Order>, WarehouseServiceError> {
        let headers = orders::Entity::find()
            .filter(orders::Column::DeletedAt.is_null())
            .order_by_asc(orders::Column::Id)
            .windowed(page)
            .all(&self.db)
            .await
            .map_err(store_err(Resource::Order, "list orders"))?;
        let lines = headers
            .load_many(live_lines(), &self.db)
            .await
            .map_err(store_err(Resource::Order, "load order items"))?;
        Ok(headers
            .into_iter()
            .zip(lines)
            .map(|(header, lines)| order_from_model(header, lines))
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Order>, WarehouseServiceError> {
        let Some(header) = orders::Entity::find_by_id(id)
            .filter(orders::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(store_err(Resource::Order, "find order by id"))?
        else {
            return Ok(None);
        };
        let lines = live_lines()
            .filter(order_items::Column::OrderId.eq(id))
            .all(&self.db)
            .await
            .map_err(store_err(Resource::Order, "load order items"))?;
        Ok(Some(order_from_model(header, lines)))
    }

    async fn save(&self, order: &Order) -> Result<Order, WarehouseServiceError> {
        let order = order.clone();
        let (header, lines) = self
            .db
            .transaction::<_, (orders::Model, Vec<order_items::Model>), DbErr>(|txn| {
                Box::pin(async move {
                    let now = Utc::now();
                    let header = orders::ActiveModel {
                        id: NotSet,
                        created_at: Set(now),
                        updated_at: Set(now),
                        deleted_at: Set(None),
                        code: Set(order.code),
                        submitted_date: Set(order.submitted_date),
                        deadline_date: Set(order.deadline_date),
                        user_id: Set(order.user_id),
                    }
                    .insert(txn)
                    .await?;
                    let lines = insert_lines(txn, header.id, &order.order_items, now).await?;
                    Ok((header, lines))
                })
            })
            .await
            .map_err(txn_err(Resource::Order, "insert order"))?;
        Ok(order_from_model(header, lines))
    }

    /// Lines that still carry an id are kept; the order's other live lines
    /// are soft-deleted and lines with `id == 0` are inserted.
    async fn update(&self, order: &Order) -> Result<Order, WarehouseServiceError> {
        let order = order.clone();
        let (header, lines) = self
            .db
            .transaction::<_, (orders::Model, Vec<order_items::Model>), DbErr>(|txn| {
                Box::pin(async move {
                    let now = Utc::now();
                    let header = orders::Entity::update(orders::ActiveModel {
                        id: Set(order.id),
                        updated_at: Set(now),
                        code: Set(order.code.clone()),
                        submitted_date: Set(order.submitted_date),
                        deadline_date: Set(order.deadline_date),
                        user_id: Set(order.user_id),
                        ..Default::default()
                    })
                    .filter(orders::Column::DeletedAt.is_null())
                    .exec(txn)
                    .await?;

                    let (kept, fresh): (Vec<OrderItem>, Vec<OrderItem>) =
                        order.order_items.into_iter().partition(|l| l.id != 0);
                    let keep: Vec<i32> = kept.iter().map(|l| l.id).collect();
                    soft_delete_lines(txn, order.id, now, &keep).await?;
                    insert_lines(txn, order.id, &fresh, now).await?;

                    let lines = live_lines()
                        .filter(order_items::Column::OrderId.eq(order.id))
                        .all(txn)
                        .await?;
                    Ok((header, lines))
                })
            })
            .await
            .map_err(txn_err(Resource::Order, "update order"))?;
        Ok(order_from_model(header, lines))
    }

    /// Soft-deletes the header and every live line together.
    async fn delete(&self, order: &Order) -> Result<(), WarehouseServiceError> {
        let id = order.id;
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    let now = Utc::now();
                    let affected = soft_delete::<orders::Entity, _>(
                        txn,
                        orders::Column::Id,
                        orders::Column::DeletedAt,
                        id,
                        now,
                    )
                    .await?;
                    if affected == 0 {
                        return Err(DbErr::RecordNotFound(format!("order {id}")));
                    }
                    soft_delete_lines(txn, id, now, &[]).await?;
                    Ok(())
                })
            })
            .await
            .map_err(txn_err(Resource::Order, "delete order"))
    }
}

impl OrderRepository for DbOrderRepository {}

fn order_from_model(header: orders::Model, lines: Vec<order_items::Model>) -> Order {
    Order {
        id: header.id,
        code: header.code,
        submitted_date: header.submitted_date,
        deadline_date: header.deadline_date,
        user_id: header.user_id,
        order_items: lines
            .into_iter()
            .map(|line| OrderItem {
                id: line.id,
                item_id: line.item_id,
                order_id: line.order_id,
                quantity: line.quantity,
            })
            .collect(),
    }
}
