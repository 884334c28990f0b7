//! Fixture builders shared by the integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use streamvault_core::roles::ROLE_CUSTOMER;
use streamvault_db::models::login::{CreateLogin, Login};
use streamvault_db::models::production_house::{CreateProductionHouse, ProductionHouse};
use streamvault_db::models::user_account::{CreateUserAccount, UserAccount};
use streamvault_db::models::web_series::{CreateWebSeries, SeriesLinks, WebSeries};
use streamvault_db::repositories::{ProductionHouseRepo, UserAccountRepo, WebSeriesRepo};
use streamvault_db::retry::RetryPolicy;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn sqlstate(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db) => db.code().map(|c| c.into_owned()),
        _ => None,
    }
}

pub async fn first_id(pool: &PgPool, table: &str) -> i64 {
    let (id,): (i64,) = sqlx::query_as(&format!("SELECT MIN(id) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap();
    id
}

pub fn new_house(name: &str) -> CreateProductionHouse {
    CreateProductionHouse {
        name: name.to_string(),
        street_addr: "1 Studio Way".to_string(),
        city: "Burbank".to_string(),
        state: "CA".to_string(),
        postal_code: "91505".to_string(),
        country: "United States".to_string(),
        year_established: 1990,
    }
}

pub async fn seed_house(pool: &PgPool, name: &str) -> ProductionHouse {
    ProductionHouseRepo::create(pool, &new_house(name)).await.unwrap()
}

pub fn new_series(name: &str, production_house_id: i64) -> CreateWebSeries {
    CreateWebSeries {
        name: name.to_string(),
        num_episodes: 8,
        language: "English".to_string(),
        release_date: date(2024, 1, 15),
        country_of_origin: "United States".to_string(),
        image_url: None,
        production_house_id,
        links: SeriesLinks::default(),
    }
}

pub async fn seed_series(pool: &PgPool, name: &str, production_house_id: i64) -> WebSeries {
    WebSeriesRepo::create(pool, RetryPolicy::default(), &new_series(name, production_house_id))
        .await
        .unwrap()
}

pub fn new_account(email: &str, country_id: i64) -> CreateUserAccount {
    CreateUserAccount {
        first_name: "Ada".to_string(),
        middle_name: None,
        last_name: "Lovelace".to_string(),
        email: email.to_string(),
        street_addr: "12 Analytical Row".to_string(),
        city: "London".to_string(),
        state: "LDN".to_string(),
        postal_code: "N1 9GU".to_string(),
        country: "United Kingdom".to_string(),
        monthly_subscription: Decimal::new(999, 2),
        country_id,
    }
}

pub fn new_login(username: &str) -> CreateLogin {
    CreateLogin {
        account_id: 0,
        username: username.to_string(),
        password_hash: "$argon2id$placeholder".to_string(),
        role: ROLE_CUSTOMER.to_string(),
    }
}

pub async fn seed_user(pool: &PgPool, username: &str) -> (UserAccount, Login) {
    let country_id = first_id(pool, "countries").await;
    UserAccountRepo::register(
        pool,
        RetryPolicy::default(),
        &new_account(&format!("{username}@example.com"), country_id),
        &new_login(username),
    )
    .await
    .unwrap()
}
