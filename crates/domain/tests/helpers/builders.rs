#![allow(dead_code)]
use nns_dns_domain::{NameRecord, NnsRecordType};

pub struct SoaRecordBuilder {
    name: String,
    primary: String,
    mailbox: String,
    serial: String,
    refresh: String,
    retry: String,
    expire: String,
    ttl: String,
}

impl SoaRecordBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            primary: name.to_string(),
            mailbox: "ops@nspcc.ru".to_string(),
            serial: "1700000000".to_string(),
            refresh: "3600".to_string(),
            retry: "600".to_string(),
            expire: "604800".to_string(),
            ttl: "3600".to_string(),
        }
    }

    pub fn primary(mut self, primary: &str) -> Self {
        self.primary = primary.to_string();
        self
    }

    pub fn mailbox(mut self, mailbox: &str) -> Self {
        self.mailbox = mailbox.to_string();
        self
    }

    pub fn serial(mut self, serial: &str) -> Self {
        self.serial = serial.to_string();
        self
    }

    pub fn refresh(mut self, refresh: &str) -> Self {
        self.refresh = refresh.to_string();
        self
    }

    pub fn expire(mut self, expire: &str) -> Self {
        self.expire = expire.to_string();
        self
    }

    pub fn ttl(mut self, ttl: &str) -> Self {
        self.ttl = ttl.to_string();
        self
    }

    pub fn data(&self) -> String {
        format!(
            "{} {} {} {} {} {} {}",
            self.primary,
            self.mailbox,
            self.serial,
            self.refresh,
            self.retry,
            self.expire,
            self.ttl
        )
    }

    pub fn build(self) -> NameRecord {
        let data = self.data();
        NameRecord::new(self.name, NnsRecordType::Soa, data)
    }
}
