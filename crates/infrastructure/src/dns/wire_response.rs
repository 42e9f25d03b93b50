//! Responses synthesized directly in wire format.

const HEADER_LEN: usize = 12;
const FLAG_QR: u8 = 0x80;
const OPCODE_AND_RD: u8 = 0x79;
const FLAG_RA: u8 = 0x80;
const RCODE_SERVFAIL: u8 = 0x02;

/// True for a datagram that has a full header and is not itself a response.
pub fn is_query(buf: &[u8]) -> bool {
    buf.len() >= HEADER_LEN && buf[2] & FLAG_QR == 0
}

/// Builds a SERVFAIL reply for `query`: same ID, opcode, RD flag and
/// question section, no records. Returns `None` for anything that is not a
/// query.
///
/// A question section that cannot be walked is left out (QDCOUNT 0) rather
/// than echoed back broken.
pub fn build_servfail(query: &[u8]) -> Option<Vec<u8>> {
    if !is_query(query) {
        return None;
    }

    let qdcount = u16::from_be_bytes([query[4], query[5]]);
    let question_end = question_section_end(query, qdcount);
    let (qdcount, question_end) = match question_end {
        Some(end) => (qdcount, end),
        None => (0, HEADER_LEN),
    };

    let mut response = Vec::with_capacity(question_end);
    response.extend_from_slice(&query[0..2]);
    response.push(FLAG_QR | (query[2] & OPCODE_AND_RD));
    response.push(FLAG_RA | RCODE_SERVFAIL);
    response.extend_from_slice(&qdcount.to_be_bytes());
    response.extend_from_slice(&[0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
    response.extend_from_slice(&query[HEADER_LEN..question_end]);

    Some(response)
}

/// Offset just past the last of `qdcount` questions, if they are well formed.
fn question_section_end(buf: &[u8], qdcount: u16) -> Option<usize> {
    let mut pos = HEADER_LEN;

    for _ in 0..qdcount {
        loop {
            let label_len = *buf.get(pos)? as usize;
            if label_len == 0 {
                pos += 1;
                break;
            }
            if label_len & 0xC0 == 0xC0 {
                buf.get(pos + 1)?;
                pos += 2;
                break;
            }
            if label_len & 0xC0 != 0 {
                return None;
            }
            pos += 1 + label_len;
        }

        // QTYPE + QCLASS
        pos += 4;
        if pos > buf.len() {
            return None;
        }
    }

    Some(pos)
}
