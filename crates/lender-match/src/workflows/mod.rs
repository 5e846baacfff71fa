pub mod adverse_credit;
