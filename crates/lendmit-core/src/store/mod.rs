// ── Local mirrors of server state ──
//
// Ordered, duplicate-free collections published through `watch` channels.
// Order matters here (newest listing first, followees in server order), so
// the storage is a snapshot vector rather than a keyed map.

mod collection;

pub(crate) use collection::{Keyed, OrderedCollection};
