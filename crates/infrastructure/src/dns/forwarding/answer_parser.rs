use dnslist_domain::{AnswerRecord, DomainError};
use hickory_proto::op::Message;
use hickory_proto::rr::RData;

/// Extracts the answer section of an upstream response.
///
/// Only A and CNAME records carry data; everything else is kept as
/// `AnswerRecord::Other` so the caller still sees the full section.
pub fn parse_answer(response_bytes: &[u8]) -> Result<Vec<AnswerRecord>, DomainError> {
    let message = Message::from_vec(response_bytes).map_err(|e| {
        DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {e}"))
    })?;

    let answers = message
        .answers
        .iter()
        .map(|record| {
            let name = record.name.to_ascii();
            match &record.data {
                RData::A(a) => AnswerRecord::a(name, record.ttl, a.0),
                RData::CNAME(canonical) => {
                    AnswerRecord::cname(name, record.ttl, canonical.to_ascii())
                }
                _ => AnswerRecord::Other { name },
            }
        })
        .collect();

    Ok(answers)
}
