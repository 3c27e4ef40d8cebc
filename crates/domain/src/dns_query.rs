use std::fmt;
use std::sync::Arc;

/// DNS header OPCODE (RFC 1035 §4.1.1, RFC 1996, RFC 2136).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCode {
    Query,
    IQuery,
    Status,
    Notify,
    Update,
    Unknown(u8),
}

impl OpCode {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Query,
            1 => Self::IQuery,
            2 => Self::Status,
            4 => Self::Notify,
            5 => Self::Update,
            other => Self::Unknown(other & 0x0F),
        }
    }

    /// Only standard and inverse queries are routed by question name; every
    /// other opcode goes straight to the default chain.
    pub fn routes_by_domain(self) -> bool {
        matches!(self, Self::Query | Self::IQuery)
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query => f.write_str("QUERY"),
            Self::IQuery => f.write_str("IQUERY"),
            Self::Status => f.write_str("STATUS"),
            Self::Notify => f.write_str("NOTIFY"),
            Self::Update => f.write_str("UPDATE"),
            Self::Unknown(v) => write!(f, "OPCODE{}", v),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Decoded name without the trailing dot, case preserved.
    pub name: Arc<str>,
    pub record_type: u16,
}

impl Question {
    pub fn new(name: impl Into<Arc<str>>, record_type: u16) -> Self {
        Self {
            name: name.into(),
            record_type,
        }
    }
}

/// An inbound DNS message as seen by the query handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuery {
    pub id: u16,
    pub opcode: OpCode,
    pub questions: Vec<Question>,
}

impl DnsQuery {
    pub fn new(id: u16, opcode: OpCode, questions: Vec<Question>) -> Self {
        Self {
            id,
            opcode,
            questions,
        }
    }

    /// First question name, for logging.
    pub fn first_name(&self) -> Option<&str> {
        self.questions.first().map(|q| q.name.as_ref())
    }
}
