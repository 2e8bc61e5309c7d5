#![allow(dead_code)]
#![allow(unused_imports)]

pub mod builders;
pub mod dns_server_mock;

pub use builders::{a, aaaa, cname, name, ns, reply_to, txt};
pub use dns_server_mock::{MockDnsServer, Protocol};
