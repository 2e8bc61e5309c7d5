use hickory_proto::rr::RecordType as HickoryRecordType;
use nsprobe_domain::RecordType;

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    /// Convert domain RecordType → hickory RecordType (for building queries)
    pub fn to_hickory(record_type: &RecordType) -> HickoryRecordType {
        match record_type {
            RecordType::A => HickoryRecordType::A,
            RecordType::AAAA => HickoryRecordType::AAAA,
            RecordType::NS => HickoryRecordType::NS,
            RecordType::CNAME => HickoryRecordType::CNAME,
            RecordType::SOA => HickoryRecordType::SOA,
            RecordType::TXT => HickoryRecordType::TXT,
        }
    }

    /// Returns `None` for types discovery never asks for.
    pub fn from_hickory(hickory_type: HickoryRecordType) -> Option<RecordType> {
        match hickory_type {
            HickoryRecordType::A => Some(RecordType::A),
            HickoryRecordType::AAAA => Some(RecordType::AAAA),
            HickoryRecordType::NS => Some(RecordType::NS),
            HickoryRecordType::CNAME => Some(RecordType::CNAME),
            HickoryRecordType::SOA => Some(RecordType::SOA),
            HickoryRecordType::TXT => Some(RecordType::TXT),
            _ => None,
        }
    }
}
