//! Stack trace capture and merging
//!
//! Traces are captured with the `backtrace` crate and resolved to
//! file/line/function descriptors at capture time. Frames are ordered
//! innermost call first.

/// A single resolved call frame
#[derive(Debug, Clone, Eq)]
pub struct Frame {
    ip: usize,
    function: Option<String>,
    file: Option<String>,
    line: Option<u32>,
}

impl Frame {
    /// Create a frame from its parts
    #[must_use]
    pub fn new(
        ip: usize,
        function: Option<String>,
        file: Option<String>,
        line: Option<u32>,
    ) -> Self {
        Self {
            ip,
            function,
            file,
            line,
        }
    }

    /// Instruction pointer of the frame
    #[must_use]
    pub fn ip(&self) -> usize {
        self.ip
    }

    /// Demangled function name, without the symbol hash
    #[must_use]
    pub fn function(&self) -> Option<&str> {
        self.function.as_deref()
    }

    /// Source file of the call site
    #[must_use]
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    /// Source line of the call site
    #[must_use]
    pub fn line(&self) -> Option<u32> {
        self.line
    }

    fn is_resolved(&self) -> bool {
        self.function.is_some() || self.file.is_some() || self.line.is_some()
    }
}

// Call sites are identified by file, line and function. Unresolved frames
// only carry an address, so they compare by it.
impl PartialEq for Frame {
    fn eq(&self, other: &Self) -> bool {
        if self.is_resolved() || other.is_resolved() {
            self.function == other.function && self.file == other.file && self.line == other.line
        } else {
            self.ip == other.ip
        }
    }
}

/// Ordered call frames, innermost first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackTrace {
    frames: Vec<Frame>,
}

impl StackTrace {
    /// Build a trace from already resolved frames
    #[must_use]
    pub fn from_frames(frames: Vec<Frame>) -> Self {
        Self { frames }
    }

    /// Capture the current call stack.
    ///
    /// The frame of this function and the frame of its immediate caller (the
    /// library entry point) are dropped, then `skip` more frames. Callers must
    /// be `#[inline(never)]` for the accounting to hold.
    ///
    /// Returns an empty trace when capture is switched off, see
    /// [`crate::config::set_stack_capture`].
    #[inline(never)]
    #[must_use]
    pub fn capture(skip: usize) -> Self {
        #[cfg(feature = "full-backtrace")]
        {
            if crate::config::stack_capture_enabled() {
                return Self::walk(Self::capture as *const () as usize, skip);
            }
        }

        let _ = skip;
        Self::default()
    }

    #[cfg(feature = "full-backtrace")]
    fn walk(marker: usize, skip: usize) -> Self {
        let mut raw = Vec::new();
        let mut start = None;

        backtrace::trace(|frame| {
            if start.is_none() && frame.symbol_address() as usize == marker {
                start = Some(raw.len() + 1);
            }
            raw.push(frame.clone());
            true
        });

        // Without a located capture frame nothing is trimmed.
        let start = start.map_or(0, |after_capture| after_capture + 1 + skip);

        let mut frames = Vec::with_capacity(raw.len().saturating_sub(start));
        for raw_frame in raw.iter().skip(start) {
            let ip = raw_frame.ip() as usize;
            let resolved = frames.len();

            // Inlined calls resolve to several symbols for one address.
            backtrace::resolve_frame(raw_frame, |symbol| {
                frames.push(Frame {
                    ip,
                    function: symbol.name().map(|name| format!("{name:#}")),
                    file: symbol.filename().map(|path| path.display().to_string()),
                    line: symbol.lineno(),
                });
            });

            if frames.len() == resolved {
                frames.push(Frame::new(ip, None, None, None));
            }
        }

        Self { frames }
    }

    /// Merge the trace carried by an error with one captured at a wrap site.
    ///
    /// Both traces normally share their outer frames (everything from the
    /// thread entry down to the common caller). The result keeps every frame
    /// of `original` in order and inserts the call sites of `new` that are
    /// not already present just before that shared suffix, each at most once:
    ///
    /// `original[..n-k] ++ dedup(new[..m-k] \ original) ++ shared suffix`
    #[must_use]
    pub fn merge(original: &Self, new: &Self) -> Self {
        if original.is_empty() {
            return new.clone();
        }
        if new.is_empty() {
            return original.clone();
        }

        let shared = original
            .frames
            .iter()
            .rev()
            .zip(new.frames.iter().rev())
            .take_while(|(ours, theirs)| ours == theirs)
            .count();
        let split = original.frames.len() - shared;

        let mut frames = Vec::with_capacity(original.frames.len() + new.frames.len() - shared);
        frames.extend_from_slice(&original.frames[..split]);
        // A recursive wrap site repeats call sites within `new` itself.
        for frame in &new.frames[..new.frames.len() - shared] {
            if !original.frames.contains(frame) && !frames[split..].contains(frame) {
                frames.push(frame.clone());
            }
        }
        frames.extend_from_slice(&original.frames[split..]);

        Self { frames }
    }

    /// Frames, innermost first
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Number of frames
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether no frame was captured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Iterate over frames, innermost first
    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }
}

impl<'a> IntoIterator for &'a StackTrace {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}
