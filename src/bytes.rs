use std::{borrow::Cow, fmt};

/// Byte buffer wrapper which `Display`s as space separated hex.
#[derive(Debug)]
pub struct Displayable<'a>(Cow<'a, [u8]>);

impl<'a> From<&'a [u8]> for Displayable<'a> {
    fn from(buf: &'a [u8]) -> Self {
        Self(Cow::Borrowed(buf))
    }
}

impl From<Box<[u8]>> for Displayable<'static> {
    fn from(buf: Box<[u8]>) -> Self {
        Self(Cow::Owned(buf.into()))
    }
}

impl<'a> Displayable<'a> {
    pub fn to_owned(&self) -> Displayable<'static> {
        Displayable::from(Box::<[u8]>::from(self.0.as_ref()))
    }
}

impl<'a> fmt::Display for Displayable<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;

        let mut iter = self.0.iter();
        if let Some(first) = iter.next() {
            write!(f, "{first:02x}")?;
        }
        for val in iter {
            write!(f, " {val:02x}")?;
        }

        write!(f, "]")
    }
}
