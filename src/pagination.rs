use serde::Deserialize;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Zero-based page index plus page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        PageRequest {
            page,
            size: size.max(1),
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.size)
    }
}

/// `page` / `size` query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl PageParams {
    /// A missing or zero size falls back to `default_size`; sizes above `max_size` are clamped.
    pub fn resolve(&self, default_size: u32, max_size: u32) -> PageRequest {
        let size = match self.size {
            Some(0) | None => default_size,
            Some(size) => size,
        };
        PageRequest::new(self.page.unwrap_or(0), size.min(max_size.max(1)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u32,
    pub size: u32,
    pub total_items: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Page {
            items,
            number: request.page,
            size: request.size,
            total_items,
        }
    }

    pub fn empty(request: PageRequest) -> Self {
        Page::new(Vec::new(), request, 0)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total_items.div_ceil(u64::from(self.size))
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_items: self.total_items,
        }
    }

    /// Wraps the page as `{<collection>: [...], current-page, total-items, total-pages}`.
    pub fn envelope<'a>(&'a self, collection: &'a str) -> PageEnvelope<'a, T> {
        PageEnvelope {
            collection,
            items: &self.items,
            current_page: self.number,
            total_items: self.total_items,
            total_pages: self.total_pages(),
        }
    }
}

/// Serialized response shape of a page.
#[derive(Debug)]
pub struct PageEnvelope<'a, T> {
    pub collection: &'a str,
    pub items: &'a [T],
    pub current_page: u32,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T: Serialize> Serialize for PageEnvelope<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry(self.collection, self.items)?;
        map.serialize_entry("current-page", &self.current_page)?;
        map.serialize_entry("total-items", &self.total_items)?;
        map.serialize_entry("total-pages", &self.total_pages)?;
        map.end()
    }
}
