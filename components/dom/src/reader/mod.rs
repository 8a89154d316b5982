use crate::dom::Document;

pub mod quick_xml;

pub trait DomReader {
    type Error;

    fn parse(self) -> Result<Document, Self::Error>;
}
