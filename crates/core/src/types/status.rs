//! Order status vocabulary.
//!
//! One canonical vocabulary is used across the database and RPC layers:
//! `pending`, `processing`, `shipped`, `delivered`, `cancelled`. Rows written
//! by older deployments may carry `confirmed`, which is parsed as an alias of
//! `processing`.

use serde::{Deserialize, Serialize};

/// Error returned when a status string is not part of the vocabulary.
#[derive(thiserror::Error, Debug, Clone)]
#[error("invalid order status: {0}")]
pub struct OrderStatusError(pub String);

/// Lifecycle status of an [`crate::Order`].
///
/// Transitions are unconditional: any status may be set from any status.
/// There is deliberately no transition gating at this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    /// Accepted and being prepared. Parses from both `processing` and the
    /// legacy spelling `confirmed`.
    #[serde(alias = "confirmed")]
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Canonical lowercase name, as stored in the database and sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = OrderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            // "confirmed" is the legacy DB spelling of the same state.
            "processing" | "confirmed" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(OrderStatusError(other.to_owned())),
        }
    }
}

// SQLx support (with postgres feature): stored as TEXT, not a PG enum type.
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for OrderStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for OrderStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(s.parse()?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for OrderStatus {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_canonical_names() {
        for status in OrderStatus::ALL {
            let parsed: OrderStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_confirmed_is_processing_alias() {
        let parsed: OrderStatus = "confirmed".parse().unwrap();
        assert_eq!(parsed, OrderStatus::Processing);
        // The alias never round-trips back out; the canonical name wins.
        assert_eq!(parsed.as_str(), "processing");
    }

    #[test]
    fn test_unknown_status_rejected() {
        let err = "refunded".parse::<OrderStatus>().unwrap_err();
        assert!(err.to_string().contains("refunded"));
    }

    #[test]
    fn test_default_is_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_serde_snake_case_and_alias() {
        let json = serde_json::to_string(&OrderStatus::Shipped).unwrap();
        assert_eq!(json, "\"shipped\"");
        let legacy: OrderStatus = serde_json::from_str("\"confirmed\"").unwrap();
        assert_eq!(legacy, OrderStatus::Processing);
    }
}
