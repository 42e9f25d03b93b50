/// Raw DNS query datagrams.
pub struct QueryBuilder {
    id: u16,
    recursion_desired: bool,
    name: String,
    qtype: u16,
}

impl QueryBuilder {
    pub fn a(name: &str) -> Self {
        Self {
            id: 0x1234,
            recursion_desired: true,
            name: name.to_string(),
            qtype: 1,
        }
    }

    pub fn with_id(mut self, id: u16) -> Self {
        self.id = id;
        self
    }

    pub fn without_recursion(mut self) -> Self {
        self.recursion_desired = false;
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(64);
        buf.extend_from_slice(&self.id.to_be_bytes());
        buf.push(if self.recursion_desired { 0x01 } else { 0x00 });
        buf.push(0x00);
        buf.extend_from_slice(&[0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
        push_name(&mut buf, &self.name);
        buf.extend_from_slice(&self.qtype.to_be_bytes());
        buf.extend_from_slice(&[0x00, 0x01]);
        buf
    }
}

pub fn push_name(buf: &mut Vec<u8>, name: &str) {
    for label in name.trim_end_matches('.').split('.') {
        buf.push(label.len() as u8);
        buf.extend_from_slice(label.as_bytes());
    }
    buf.push(0);
}
