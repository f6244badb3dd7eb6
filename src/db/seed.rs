//! Placeholder rows for local development.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::db::models::InvoiceStatus::{self, Paid, Pending};

pub struct SeedCustomer {
    pub id: Uuid,
    pub name: &'static str,
    pub email: &'static str,
    pub image_url: &'static str,
}

pub struct SeedInvoice {
    pub id: Uuid,
    pub customer: usize,
    pub amount: i32,
    pub status: InvoiceStatus,
    pub date: (i32, u32, u32),
}

impl SeedInvoice {
    pub fn customer_id(&self) -> Uuid {
        CUSTOMERS[self.customer].id
    }

    pub fn date(&self) -> Option<NaiveDate> {
        let (y, m, d) = self.date;
        NaiveDate::from_ymd_opt(y, m, d)
    }
}

pub struct SeedUser {
    pub id: Uuid,
    pub email: &'static str,
    /// Stored verbatim; this crate never interprets the column.
    pub password: &'static str,
}

pub const USERS: &[SeedUser] = &[SeedUser {
    id: Uuid::from_u128(0x410544b2_4001_4271_9855_fec4b6a6442a),
    email: "user@nextmail.com",
    password: "123456",
}];

pub const CUSTOMERS: &[SeedCustomer] = &[
    SeedCustomer {
        id: Uuid::from_u128(0xd6e15727_9fe1_4961_8c5b_ea44a9bd81aa),
        name: "Evil Rabbit",
        email: "evil@rabbit.com",
        image_url: "/customers/evil-rabbit.png",
    },
    SeedCustomer {
        id: Uuid::from_u128(0x3958dc9e_712f_4377_85e9_fec4b6a6442a),
        name: "Delba de Oliveira",
        email: "delba@oliveira.com",
        image_url: "/customers/delba-de-oliveira.png",
    },
    SeedCustomer {
        id: Uuid::from_u128(0x3958dc9e_742f_4377_85e9_fec4b6a6442a),
        name: "Lee Robinson",
        email: "lee@robinson.com",
        image_url: "/customers/lee-robinson.png",
    },
    SeedCustomer {
        id: Uuid::from_u128(0x76d65c26_f784_44a2_ac19_586678f7c2f2),
        name: "Michael Novotny",
        email: "michael@novotny.com",
        image_url: "/customers/michael-novotny.png",
    },
    SeedCustomer {
        id: Uuid::from_u128(0xcc27c14a_0acf_4f4a_a6c9_d45682c144b9),
        name: "Amy Burns",
        email: "amy@burns.com",
        image_url: "/customers/amy-burns.png",
    },
    SeedCustomer {
        id: Uuid::from_u128(0x13d07535_c59e_4157_a011_f8d2ef4e0cbb),
        name: "Balazs Orban",
        email: "balazs@orban.com",
        image_url: "/customers/balazs-orban.png",
    },
];

pub const INVOICES: &[SeedInvoice] = &[
    SeedInvoice {
        id: Uuid::from_u128(0x53a8f99c_b1b6_4333_975f_3b91f0441ef3),
        customer: 0,
        amount: 15795,
        status: Pending,
        date: (2022, 12, 6),
    },
    SeedInvoice {
        id: Uuid::from_u128(0x87821fb1_8e2b_48a7_a585_41ad90a49cb8),
        customer: 1,
        amount: 20348,
        status: Pending,
        date: (2022, 11, 14),
    },
    SeedInvoice {
        id: Uuid::from_u128(0x3ad94d95_f1ef_42dd_8281_dacf674087e6),
        customer: 4,
        amount: 3040,
        status: Paid,
        date: (2022, 10, 29),
    },
    SeedInvoice {
        id: Uuid::from_u128(0xaa5c1cf0_2b6c_4b14_a2ab_14764c8a90f9),
        customer: 3,
        amount: 44800,
        status: Paid,
        date: (2023, 9, 10),
    },
    SeedInvoice {
        id: Uuid::from_u128(0xdf7f1ff6_1479_42c0_9baa_c15a39c619d4),
        customer: 5,
        amount: 34577,
        status: Pending,
        date: (2023, 8, 5),
    },
    SeedInvoice {
        id: Uuid::from_u128(0xf5fa6bd6_9142_43b1_a684_af62a79f19fa),
        customer: 2,
        amount: 54246,
        status: Pending,
        date: (2023, 7, 16),
    },
    SeedInvoice {
        id: Uuid::from_u128(0xf53eea45_759c_4aa1_8a04_1ecbbf0f256d),
        customer: 0,
        amount: 666,
        status: Pending,
        date: (2023, 6, 27),
    },
    SeedInvoice {
        id: Uuid::from_u128(0xb0e331f5_f4bb_4530_9c2f_f271ad8d3826),
        customer: 3,
        amount: 32545,
        status: Paid,
        date: (2023, 6, 9),
    },
    SeedInvoice {
        id: Uuid::from_u128(0xd355fadc_ac2c_47d4_8aa6_8ee982e46fc3),
        customer: 4,
        amount: 1250,
        status: Paid,
        date: (2023, 6, 17),
    },
    SeedInvoice {
        id: Uuid::from_u128(0x021f0c47_8866_4d3c_8f4c_a425097f6fb4),
        customer: 5,
        amount: 8546,
        status: Paid,
        date: (2023, 6, 7),
    },
    SeedInvoice {
        id: Uuid::from_u128(0x8c02f427_ac91_43b3_96ad_3e17132c5906),
        customer: 1,
        amount: 500,
        status: Paid,
        date: (2023, 8, 19),
    },
    SeedInvoice {
        id: Uuid::from_u128(0x4cfe3a68_d5c4_4a89_b029_72e61f34557f),
        customer: 5,
        amount: 8945,
        status: Paid,
        date: (2023, 6, 3),
    },
    SeedInvoice {
        id: Uuid::from_u128(0xc115a092_e203_43c3_966e_e8c6c2ea95c5),
        customer: 2,
        amount: 1000,
        status: Paid,
        date: (2022, 6, 5),
    },
];

pub const REVENUE: &[(&str, i32)] = &[
    ("Jan", 2000),
    ("Feb", 1800),
    ("Mar", 2200),
    ("Apr", 2500),
    ("May", 2300),
    ("Jun", 3200),
    ("Jul", 3500),
    ("Aug", 3700),
    ("Sep", 2500),
    ("Oct", 2800),
    ("Nov", 3000),
    ("Dec", 4800),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invoices_reference_known_customers_and_valid_dates() {
        for inv in INVOICES {
            assert!(inv.customer < CUSTOMERS.len());
            assert!(inv.date().is_some(), "bad date {:?}", inv.date);
        }
    }

    #[test]
    fn seed_covers_both_statuses() {
        assert!(INVOICES.iter().any(|i| i.status == Paid));
        assert!(INVOICES.iter().any(|i| i.status == Pending));
    }

    #[test]
    fn months_fit_revenue_column() {
        assert_eq!(REVENUE.len(), 12);
        assert!(REVENUE.iter().all(|(m, _)| m.len() <= 4));
    }
}
