use std::str::from_utf8;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use crate::chars::XmlBytesExt;
use crate::dom::{Attribute, Document, Element, Name};
use crate::error::{Error, Reason, Result};
use crate::reader::DomReader;

pub struct QuickXmlDomReader<'r> {
    reader: NsReader<&'r [u8]>,
    order: usize,
}

fn conv_utf8(s: &[u8], offset: usize) -> Result<&str> {
    from_utf8(s).map_err(|err| Error::new(offset, Reason::Utf8(err)))
}

fn namespace_uri(ns: ResolveResult, offset: usize) -> Result<Option<String>> {
    match ns {
        ResolveResult::Bound(Namespace(uri)) => Ok(Some(conv_utf8(uri, offset)?.to_string())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(Error::new(
            offset,
            Reason::UnknownPrefix(String::from_utf8_lossy(&prefix).into_owned()),
        )),
    }
}

impl<'r> QuickXmlDomReader<'r> {
    pub fn new(input: &'r str) -> Self {
        let mut reader = NsReader::from_str(input);
        let config = reader.config_mut();
        config.check_comments = false;
        config.check_end_names = false;
        config.trim_text(false);
        config.trim_markup_names_in_closing_tags = true;

        Self { reader, order: 0 }
    }

    fn offset(&self) -> usize {
        self.reader.buffer_position() as usize
    }

    fn error(&self, reason: Reason) -> Error {
        Error::new(self.offset(), reason)
    }

    fn next_order(&mut self) -> usize {
        self.order += 1;
        self.order
    }

    fn read_event(&mut self) -> Result<(Option<String>, Event<'r>)> {
        let offset = self.offset();
        let (ns, evt) = self
            .reader
            .read_resolved_event()
            .map_err(|err| Error::new(offset, Reason::Xml(err)))?;
        Ok((namespace_uri(ns, offset)?, evt))
    }

    fn create_name(&self, prefix: Option<&[u8]>, local: &[u8], ns: Option<String>) -> Result<Name> {
        let offset = self.offset();
        let prefix = match prefix {
            Some(prefix) => Some(conv_utf8(prefix, offset)?.to_string()),
            None => None,
        };
        Ok(Name::new(prefix, conv_utf8(local, offset)?, ns))
    }

    fn create_element(&mut self, start: &BytesStart, namespace: Option<String>) -> Result<Element> {
        let qname = start.name();
        let name = self.create_name(
            qname.prefix().as_ref().map(|prefix| prefix.as_ref()),
            start.local_name().as_ref(),
            namespace,
        )?;
        let mut element = Element::new(self.next_order(), name);

        for attr in start.attributes() {
            let attr = attr.map_err(|err| self.error(Reason::Xml(err.into())))?;
            if attr.key.as_namespace_binding().is_some() {
                continue;
            }

            let (ns, local) = self.reader.resolve_attribute(attr.key);
            let namespace = namespace_uri(ns, self.offset())?;
            let prefix = attr.key.prefix();
            let name = self.create_name(
                prefix.as_ref().map(|prefix| prefix.as_ref()),
                local.as_ref(),
                namespace,
            )?;
            let value = attr
                .unescape_value()
                .map_err(|err| self.error(Reason::Xml(err)))?;
            element.push_attribute(Attribute::new(self.next_order(), name, value.into_owned()));
        }

        Ok(element)
    }

    fn push_text(&mut self, stack: &mut [Element], text: &str) {
        if text.is_empty() {
            return;
        }
        let order = self.next_order();
        if let Some(top) = stack.last_mut() {
            top.push_text(order, text);
        }
    }

    fn parse_inner_xml(&mut self, start: Element) -> Result<Element> {
        let mut stack: Vec<Element> = Vec::with_capacity(16);
        stack.push(start);

        loop {
            let (namespace, evt) = self.read_event()?;
            match evt {
                Event::Start(start) => {
                    let element = self.create_element(&start, namespace)?;
                    stack.push(element);
                }
                Event::End(end) => {
                    let element = match stack.pop() {
                        Some(element) => element,
                        None => unreachable!(),
                    };
                    let found = conv_utf8(end.name().into_inner(), self.offset())?;
                    let expected = element.name().qualified_name();
                    if found != expected {
                        return Err(self.error(Reason::EndEventMismatch {
                            expected: expected.into_owned(),
                            found: found.to_string(),
                        }));
                    }

                    match stack.last_mut() {
                        Some(parent) => parent.push_child(element),
                        None => return Ok(element),
                    }
                }
                Event::Empty(start) => {
                    let element = self.create_element(&start, namespace)?;
                    match stack.last_mut() {
                        Some(parent) => parent.push_child(element),
                        None => unreachable!(),
                    }
                }
                Event::Text(text) => {
                    let text = text.unescape().map_err(|err| self.error(Reason::Xml(err)))?;
                    self.push_text(&mut stack, &text);
                }
                Event::CData(cdata) => {
                    let text = conv_utf8(&cdata, self.offset())?;
                    self.push_text(&mut stack, text);
                }
                Event::DocType(_) => return Err(self.error(Reason::UnexpectedDocType)),
                Event::Decl(_) => return Err(self.error(Reason::UnexpectedDecl)),
                Event::Comment(_) | Event::PI(_) => {} // ignore
                Event::Eof => return Err(self.error(Reason::UnexpectedEof)),
            }
        }
    }
}

impl<'r> DomReader for QuickXmlDomReader<'r> {
    type Error = Error;

    fn parse(mut self) -> Result<Document> {
        // prolog
        let mut seen_decl = false;
        let mut seen_doctype = false;

        let root: Element = loop {
            let (namespace, evt) = self.read_event()?;
            match evt {
                Event::Start(start) => {
                    let root = self.create_element(&start, namespace)?;
                    break self.parse_inner_xml(root)?;
                }
                Event::Empty(start) => {
                    break self.create_element(&start, namespace)?;
                }
                Event::Text(text) if text.only_xml_whitespace() => continue,
                Event::Comment(_) | Event::PI(_) => continue,
                Event::Decl(_) => {
                    if seen_doctype || seen_decl {
                        return Err(self.error(Reason::UnexpectedDecl));
                    }
                    seen_decl = true;
                }
                Event::DocType(_) => {
                    if seen_doctype {
                        return Err(self.error(Reason::UnexpectedDocType));
                    }
                    seen_doctype = true;
                }
                Event::End(end) => {
                    return Err(self.error(Reason::EndEventMismatch {
                        expected: "".to_string(),
                        found: conv_utf8(end.name().into_inner(), self.offset())?.to_string(),
                    }))
                }
                Event::Text(text) => {
                    return Err(self.error(Reason::UnexpectedToken(
                        String::from_utf8_lossy(&text).into_owned(),
                    )))
                }
                Event::CData(_) => {
                    return Err(self.error(Reason::UnexpectedToken("<![CDATA[".to_string())))
                }
                Event::Eof => return Err(self.error(Reason::UnexpectedEof)),
            }
        };

        // only misc after the root element
        loop {
            match self.read_event()?.1 {
                Event::Eof => return Ok(Document::new(root)),
                Event::Text(text) if text.only_xml_whitespace() => (),
                Event::Comment(_) | Event::PI(_) => (),
                _ => return Err(self.error(Reason::TrailingContent)),
            }
        }
    }
}
