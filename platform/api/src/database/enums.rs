use async_graphql::Enum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type, Enum)]
#[sqlx(type_name = "sport_kind", rename_all = "lowercase")]
pub enum SportKind {
	Football,
	Futsal,
	Basketball,
	Tennis,
	Padel,
	Volleyball,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, sqlx::Type, Enum)]
#[sqlx(type_name = "customer_role", rename_all = "lowercase")]
pub enum CustomerRole {
	#[default]
	Customer,
	Admin,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, sqlx::Type, Enum)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
pub enum BookingStatus {
	#[default]
	Pending,
	Confirmed,
	Cancelled,
	Completed,
}

impl BookingStatus {
	/// `pending -> confirmed | cancelled`, `confirmed -> completed | cancelled`.
	pub fn can_transition_to(self, next: BookingStatus) -> bool {
		matches!(
			(self, next),
			(Self::Pending, Self::Confirmed)
				| (Self::Pending, Self::Cancelled)
				| (Self::Confirmed, Self::Completed)
				| (Self::Confirmed, Self::Cancelled)
		)
	}

	/// Statuses that hold the field's time slot.
	pub fn holds_slot(self) -> bool {
		matches!(self, Self::Pending | Self::Confirmed)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Enum)]
#[sqlx(type_name = "payment_method", rename_all = "lowercase")]
pub enum PaymentMethod {
	Card,
	Cash,
	Wallet,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, sqlx::Type, Enum)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
pub enum PaymentStatus {
	#[default]
	Pending,
	Paid,
	Refunded,
	Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type, Enum)]
#[sqlx(type_name = "subscription_plan", rename_all = "lowercase")]
pub enum SubscriptionPlan {
	Basic,
	Premium,
	Elite,
}

impl SubscriptionPlan {
	pub const ALL: [SubscriptionPlan; 3] = [Self::Basic, Self::Premium, Self::Elite];

	pub fn monthly_price_cents(self) -> i64 {
		match self {
			Self::Basic => 999,
			Self::Premium => 1999,
			Self::Elite => 3999,
		}
	}

	/// Discount applied to every booking made while the plan is active.
	pub fn booking_discount_percent(self) -> u32 {
		match self {
			Self::Basic => 0,
			Self::Premium => 10,
			Self::Elite => 20,
		}
	}
}
