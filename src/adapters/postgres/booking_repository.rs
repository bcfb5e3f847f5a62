use crate::domain::{
    Booking, BookingFilter, BookingId, BookingPeriod, BookingStatus, ItemId, PageRequest, UserId,
};
use crate::ports::booking_repository::{BookingRepository as BookingRepositoryTrait, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder, Row, postgres::PgRow};
use std::str::FromStr;

/// 予約の取得に共通のSELECT句
///
/// 所有者IDはitemsとの結合で補う。
const SELECT_BOOKINGS: &str = r#"
    SELECT
        b.booking_id,
        b.item_id,
        i.owner_id AS item_owner_id,
        b.booker_id,
        b.start_at,
        b.end_at,
        b.status
    FROM bookings b
    JOIN items i ON i.item_id = b.item_id
"#;

fn invalid_data(message: String) -> Box<dyn std::error::Error + Send + Sync> {
    Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, message))
}

/// PostgreSQLの行データをBookingに変換する
///
/// statusの文字列と期間の不変条件を検証する。
fn map_row_to_booking(row: &PgRow) -> Result<Booking> {
    let status_str: &str = row.get("status");
    let status = BookingStatus::from_str(status_str).map_err(invalid_data)?;

    let period = BookingPeriod::new(row.get("start_at"), row.get("end_at"))
        .map_err(|e| invalid_data(format!("{:?}", e)))?;

    Ok(Booking {
        booking_id: BookingId::from_uuid(row.get("booking_id")),
        item_id: ItemId::from_uuid(row.get("item_id")),
        item_owner_id: UserId::from_uuid(row.get("item_owner_id")),
        booker_id: UserId::from_uuid(row.get("booker_id")),
        period,
        status,
    })
}

/// 分類の条件をWHERE句に追加する
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: BookingFilter) {
    match filter {
        BookingFilter::All => {}
        BookingFilter::Past { now } => {
            builder.push(" AND b.end_at < ").push_bind(now);
        }
        BookingFilter::Current { now } => {
            builder
                .push(" AND b.start_at < ")
                .push_bind(now)
                .push(" AND b.end_at > ")
                .push_bind(now);
        }
        BookingFilter::Future { now } => {
            builder.push(" AND b.start_at > ").push_bind(now);
        }
        BookingFilter::Status(status) => {
            builder.push(" AND b.status = ").push_bind(status.as_str());
        }
    }
}

/// BookingRepositoryのPostgreSQL実装
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// PostgreSQLコネクションプールから新しいBookingRepositoryを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 分類・並び順・ページングをSQLで適用して検索する
    ///
    /// 開始日時が同じ予約はbooking_idで順序を固定する。
    async fn find_page(
        &self,
        owner_column: &str,
        user_id: UserId,
        filter: BookingFilter,
        page: PageRequest,
    ) -> Result<Vec<Booking>> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_BOOKINGS);
        builder
            .push(" WHERE ")
            .push(owner_column)
            .push(" = ")
            .push_bind(user_id.value());
        push_filter(&mut builder, filter);
        builder
            .push(" ORDER BY b.start_at DESC, b.booking_id LIMIT ")
            .push_bind(i64::from(page.limit()))
            .push(" OFFSET ")
            .push_bind(page.skip() as i64);

        let rows = builder.build().fetch_all(&self.pool).await?;
        rows.iter().map(map_row_to_booking).collect()
    }
}

#[async_trait]
impl BookingRepositoryTrait for BookingRepository {
    /// 新しい予約を挿入する（既存のIDは主キー違反としてエラー）
    async fn save(&self, booking: &Booking) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO bookings (booking_id, item_id, booker_id, start_at, end_at, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(booking.booking_id.value())
        .bind(booking.item_id.value())
        .bind(booking.booker_id.value())
        .bind(booking.start())
        .bind(booking.end())
        .bind(booking.status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>> {
        let row = sqlx::query(&format!("{SELECT_BOOKINGS} WHERE b.booking_id = $1"))
            .bind(booking_id.value())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_row_to_booking).transpose()
    }

    /// `UPDATE ... WHERE status = expected`の1文で確認と更新を行う
    async fn update_status_if(
        &self,
        booking_id: BookingId,
        expected: BookingStatus,
        new_status: BookingStatus,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE bookings
            SET status = $3
            WHERE booking_id = $1 AND status = $2
            "#,
        )
        .bind(booking_id.value())
        .bind(expected.as_str())
        .bind(new_status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn find_by_booker(
        &self,
        booker_id: UserId,
        filter: BookingFilter,
        page: PageRequest,
    ) -> Result<Vec<Booking>> {
        self.find_page("b.booker_id", booker_id, filter, page).await
    }

    async fn find_by_item_owner(
        &self,
        owner_id: UserId,
        filter: BookingFilter,
        page: PageRequest,
    ) -> Result<Vec<Booking>> {
        self.find_page("i.owner_id", owner_id, filter, page).await
    }

    async fn find_approved_for_item(&self, item_id: ItemId) -> Result<Vec<Booking>> {
        let rows = sqlx::query(&format!(
            "{SELECT_BOOKINGS} WHERE b.item_id = $1 AND b.status = 'APPROVED' ORDER BY b.start_at ASC"
        ))
        .bind(item_id.value())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_booking).collect()
    }

    async fn find_approved_for_owner(&self, owner_id: UserId) -> Result<Vec<Booking>> {
        let rows = sqlx::query(&format!(
            "{SELECT_BOOKINGS} WHERE i.owner_id = $1 AND b.status = 'APPROVED' ORDER BY b.start_at ASC"
        ))
        .bind(owner_id.value())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_booking).collect()
    }

    async fn exists_for_comment_eligibility(
        &self,
        user_id: UserId,
        item_id: ItemId,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM bookings
                WHERE booker_id = $1
                  AND item_id = $2
                  AND ((status = 'APPROVED' AND start_at < $3) OR status = 'CANCELED')
            )
            "#,
        )
        .bind(user_id.value())
        .bind(item_id.value())
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
