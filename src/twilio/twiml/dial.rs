use super::{escape, format_xml_string, Action, TwimlError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialTarget {
    Number(String),
    Client(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dial {
    pub caller_id: String,
    pub target: DialTarget,
}

impl Action for Dial {
    fn as_twiml(&self) -> Result<String, TwimlError> {
        let inner = match self.target {
            DialTarget::Number(ref number) => format_xml_string("Number", &[], &escape(number)?)?,
            DialTarget::Client(ref name) => format_xml_string("Client", &[], &escape(name)?)?,
        };

        format_xml_string("Dial", &[("callerId", &self.caller_id)], &inner)
    }
}
