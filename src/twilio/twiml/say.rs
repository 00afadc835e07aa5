use super::{escape, format_xml_string, Action, TwimlError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Say {
    pub txt: String,
}

impl Say {
    pub fn new(txt: &str) -> Say {
        Say {
            txt: txt.to_owned(),
        }
    }
}

impl Action for Say {
    fn as_twiml(&self) -> Result<String, TwimlError> {
        format_xml_string("Say", &[], &escape(&self.txt)?)
    }
}
