#![allow(dead_code)]

pub const TYPE_A: u16 = 1;
pub const TYPE_CNAME: u16 = 5;
pub const TYPE_AAAA: u16 = 28;
pub const CLASS_IN: u16 = 1;

/// Compression pointer to the question name right after the header.
pub const PTR_TO_QUESTION: [u8; 2] = [0xC0, 0x0C];

/// `"www.google.com"` => `"\x03www\x06google\x03com\x00"`, `"."` => `"\x00"`.
pub fn encode_name(name: &str) -> Vec<u8> {
    let mut out = Vec::new();
    if name != "." {
        for label in name.trim_end_matches('.').split('.') {
            out.push(label.len() as u8);
            out.extend_from_slice(label.as_bytes());
        }
    }
    out.push(0x00);
    out
}

/// Hand-assembles DNS datagrams, including deliberately broken ones.
pub struct PacketBuilder {
    id: u16,
    flags: u16,
    question_count: u16,
    answer_count: Option<u16>,
    name: Vec<u8>,
    qtype: u16,
    qclass: u16,
    answers: Vec<u8>,
    records: u16,
}

impl PacketBuilder {
    /// Standard query with RD set.
    pub fn query(name: &str) -> Self {
        Self::with_flags(name, 0x0100)
    }

    /// Standard reply with RD and RA set, NOERROR.
    pub fn reply(name: &str) -> Self {
        Self::with_flags(name, 0x8180)
    }

    fn with_flags(name: &str, flags: u16) -> Self {
        Self {
            id: 0x1234,
            flags,
            question_count: 1,
            answer_count: None,
            name: encode_name(name),
            qtype: TYPE_A,
            qclass: CLASS_IN,
            answers: Vec::new(),
            records: 0,
        }
    }

    pub fn id(mut self, id: u16) -> Self {
        self.id = id;
        self
    }

    pub fn flags(mut self, flags: u16) -> Self {
        self.flags = flags;
        self
    }

    pub fn question_count(mut self, count: u16) -> Self {
        self.question_count = count;
        self
    }

    /// Overrides the answer count written in the header.
    pub fn answer_count(mut self, count: u16) -> Self {
        self.answer_count = Some(count);
        self
    }

    pub fn raw_name(mut self, name: Vec<u8>) -> Self {
        self.name = name;
        self
    }

    pub fn qtype(mut self, qtype: u16) -> Self {
        self.qtype = qtype;
        self
    }

    pub fn qclass(mut self, qclass: u16) -> Self {
        self.qclass = qclass;
        self
    }

    pub fn record(mut self, name: &[u8], rtype: u16, rclass: u16, rdata: &[u8]) -> Self {
        self.answers.extend_from_slice(name);
        self.answers.extend_from_slice(&rtype.to_be_bytes());
        self.answers.extend_from_slice(&rclass.to_be_bytes());
        self.answers.extend_from_slice(&300u32.to_be_bytes());
        self.answers
            .extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        self.answers.extend_from_slice(rdata);
        self.records += 1;
        self
    }

    pub fn a(self, addr: [u8; 4]) -> Self {
        self.record(&PTR_TO_QUESTION, TYPE_A, CLASS_IN, &addr)
    }

    pub fn aaaa(self, addr: [u8; 16]) -> Self {
        self.record(&PTR_TO_QUESTION, TYPE_AAAA, CLASS_IN, &addr)
    }

    pub fn cname(self, target: &str) -> Self {
        self.record(&PTR_TO_QUESTION, TYPE_CNAME, CLASS_IN, &encode_name(target))
    }

    /// Appends bytes to the answer section without counting a record.
    pub fn raw_answer_bytes(mut self, bytes: &[u8]) -> Self {
        self.answers.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(12 + self.name.len() + 4 + self.answers.len());
        buf.extend_from_slice(&self.id.to_be_bytes());
        buf.extend_from_slice(&self.flags.to_be_bytes());
        buf.extend_from_slice(&self.question_count.to_be_bytes());
        buf.extend_from_slice(&self.answer_count.unwrap_or(self.records).to_be_bytes());
        buf.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
        buf.extend_from_slice(&self.name);
        buf.extend_from_slice(&self.qtype.to_be_bytes());
        buf.extend_from_slice(&self.qclass.to_be_bytes());
        buf.extend_from_slice(&self.answers);
        buf
    }
}
