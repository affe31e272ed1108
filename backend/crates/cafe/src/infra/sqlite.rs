//! SQLite Repository Implementation

use kernel::id::CafeId;
use sqlx::SqlitePool;

use crate::domain::entities::{Cafe, NewCafe};
use crate::domain::repository::CafeRepository;
use crate::domain::value_objects::{MapUrl, Rating, RatingScale};
use crate::error::{CafeError, CafeResult};

const SELECT_CAFE: &str = r#"
    SELECT
        id,
        name,
        city_name,
        map_url,
        open_time,
        closing_time,
        coffee_rating,
        wifi_rating,
        power_outlet
    FROM cafes
"#;

/// SQLite-backed cafe repository
#[derive(Clone)]
pub struct SqliteCafeRepository {
    pool: SqlitePool,
}

impl SqliteCafeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Turn a user query into a `LIKE` pattern that matches it literally
fn contains_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for ch in query.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

impl CafeRepository for SqliteCafeRepository {
    async fn add(&self, cafe: NewCafe) -> CafeResult<Cafe> {
        let id = sqlx::query(
            r#"
            INSERT INTO cafes (
                name,
                city_name,
                map_url,
                open_time,
                closing_time,
                coffee_rating,
                wifi_rating,
                power_outlet
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&cafe.name)
        .bind(&cafe.city_name)
        .bind(cafe.map_url.as_str())
        .bind(&cafe.open_time)
        .bind(&cafe.closing_time)
        .bind(cafe.coffee_rating.as_str())
        .bind(cafe.wifi_rating.as_str())
        .bind(cafe.power_outlet.as_str())
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(cafe.into_cafe(CafeId::from_i64(id)))
    }

    async fn list_all(&self) -> CafeResult<Vec<Cafe>> {
        let rows = sqlx::query_as::<_, CafeRow>(&format!("{SELECT_CAFE} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(CafeRow::into_cafe).collect()
    }

    async fn search(&self, query: &str) -> CafeResult<Vec<Cafe>> {
        let sql = format!(
            r"{SELECT_CAFE} WHERE name LIKE ?1 ESCAPE '\' OR city_name LIKE ?1 ESCAPE '\' ORDER BY id"
        );

        let rows = sqlx::query_as::<_, CafeRow>(&sql)
            .bind(contains_pattern(query))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(CafeRow::into_cafe).collect()
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct CafeRow {
    id: i64,
    name: String,
    city_name: String,
    map_url: String,
    open_time: String,
    closing_time: String,
    coffee_rating: String,
    wifi_rating: String,
    power_outlet: String,
}

impl CafeRow {
    fn into_cafe(self) -> CafeResult<Cafe> {
        let id = self.id;
        let rating = |scale: RatingScale, value: &str| {
            Rating::from_db(scale, value).ok_or_else(|| {
                CafeError::Internal(format!("Invalid {scale:?} rating {value:?} on cafe {id}"))
            })
        };

        Ok(Cafe {
            id: CafeId::from_i64(self.id),
            coffee_rating: rating(RatingScale::Coffee, &self.coffee_rating)?,
            wifi_rating: rating(RatingScale::Wifi, &self.wifi_rating)?,
            power_outlet: rating(RatingScale::Power, &self.power_outlet)?,
            name: self.name,
            city_name: self.city_name,
            map_url: MapUrl::from_db(self.map_url),
            open_time: self.open_time,
            closing_time: self.closing_time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn repo() -> SqliteCafeRepository {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("../../../database/migrations")
            .run(&pool)
            .await
            .unwrap();
        SqliteCafeRepository::new(pool)
    }

    fn new_cafe(name: &str, city: &str) -> NewCafe {
        NewCafe {
            name: name.to_string(),
            city_name: city.to_string(),
            map_url: MapUrl::new("https://maps.example/1").unwrap(),
            open_time: "8AM".to_string(),
            closing_time: "8PM".to_string(),
            coffee_rating: Rating::new(RatingScale::Coffee, "☕☕").unwrap(),
            wifi_rating: Rating::new(RatingScale::Wifi, "💪💪💪").unwrap(),
            power_outlet: Rating::new(RatingScale::Power, "🔌").unwrap(),
        }
    }

    fn names(cafes: Vec<Cafe>) -> Vec<String> {
        cafes.into_iter().map(|c| c.name).collect()
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("blue"), "%blue%");
        assert_eq!(contains_pattern("50%_off"), r"%50\%\_off%");
        assert_eq!(contains_pattern(r"a\b"), r"%a\\b%");
    }

    #[tokio::test]
    async fn test_add_and_list_in_insertion_order() {
        let repo = repo().await;
        let first = repo.add(new_cafe("Blue Bottle", "Paris")).await.unwrap();
        let second = repo.add(new_cafe("Anchor", "London")).await.unwrap();
        assert!(first.id.as_i64() < second.id.as_i64());

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], first);
        assert_eq!(names(all), ["Blue Bottle", "Anchor"]);
    }

    #[tokio::test]
    async fn test_ratings_round_trip() {
        let repo = repo().await;
        repo.add(new_cafe("Blue Bottle", "Paris")).await.unwrap();

        let cafe = repo.list_all().await.unwrap().remove(0);
        assert_eq!(cafe.coffee_rating.as_str(), "☕☕");
        assert_eq!(cafe.wifi_rating.as_str(), "💪💪💪");
        assert_eq!(cafe.power_outlet.as_str(), "🔌");
        assert_eq!(cafe.map_url.as_str(), "https://maps.example/1");
    }

    #[tokio::test]
    async fn test_search_name_or_city_case_insensitive() {
        let repo = repo().await;
        repo.add(new_cafe("Blue Bottle", "Paris")).await.unwrap();
        repo.add(new_cafe("Parisian Corner", "Lyon")).await.unwrap();
        repo.add(new_cafe("Anchor", "London")).await.unwrap();

        let found = repo.search("PARIS").await.unwrap();
        assert_eq!(names(found), ["Blue Bottle", "Parisian Corner"]);

        assert_eq!(names(repo.search("blue").await.unwrap()), ["Blue Bottle"]);
        assert!(repo.search("tokyo").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_literally() {
        let repo = repo().await;
        repo.add(new_cafe("100% Arabica", "Berlin")).await.unwrap();
        repo.add(new_cafe("Cafe_One", "Oslo")).await.unwrap();
        repo.add(new_cafe("Plain", "Rome")).await.unwrap();

        assert_eq!(names(repo.search("%").await.unwrap()), ["100% Arabica"]);
        assert_eq!(names(repo.search("_").await.unwrap()), ["Cafe_One"]);
        assert!(repo.search(r"\").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_rating_is_reported() {
        let repo = repo().await;
        sqlx::query(
            "INSERT INTO cafes (name, city_name, map_url, open_time, closing_time, coffee_rating, wifi_rating, power_outlet)
             VALUES ('X', 'Y', 'https://a.example', '8AM', '8PM', '5', '✘', '✘')",
        )
        .execute(&repo.pool)
        .await
        .unwrap();

        assert!(matches!(repo.list_all().await, Err(CafeError::Internal(_))));
    }
}
