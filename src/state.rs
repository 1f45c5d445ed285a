/*
 * Saves and restores a container's window placement together with the
 * geometry of every docked child. The document is a single JSON object:
 *
 *   {"WindowState":"<flags> <showCmd> <minX> <minY> <maxX> <maxY> <l> <t> <r> <b>",
 *    "Controls":[{"X":..,"Y":..,"Width":..,"Height":..}, ...]}
 *
 * `Controls` follows binding order at save time. On load, the placement is
 * always applied, but child geometry is only restored when the number of
 * saved controls equals the number of live bindings; a different count means
 * the layout changed since the state was written.
 */
use serde::{Deserialize, Deserializer, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use crate::dockable::DockHost;
use crate::error::{PlatformError, Result as PlatformResult};
use crate::layout::DockLayout;
use crate::types::WindowPlacement;

/// Geometry of one docked child at save time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CtlState {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LayoutState {
    pub window_state: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub controls: Vec<CtlState>,
}

// Documents written for an empty layout carry `"Controls":null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<CtlState>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<CtlState>>::deserialize(deserializer)?.unwrap_or_default())
}

impl LayoutState {
    /// Snapshots the host's window placement and the geometry of each bound child.
    pub fn capture<H: DockHost + ?Sized>(layout: &DockLayout, host: &H) -> PlatformResult<Self> {
        let placement = host.window_placement()?;

        let mut controls = Vec::with_capacity(layout.len());
        for binding in layout.bindings() {
            let child = host.child(binding.control_id).ok_or_else(|| {
                PlatformError::InvalidHandle(format!(
                    "control {} is docked but not registered with the host",
                    binding.control_id.raw()
                ))
            })?;
            let position = child.position();
            let size = child.size();
            controls.push(CtlState {
                x: position.x,
                y: position.y,
                width: size.width,
                height: size.height,
            });
        }

        Ok(Self {
            window_state: placement.to_string(),
            controls,
        })
    }

    /*
     * Applies the saved placement, then the saved child geometry if and only if
     * the control count still matches the layout. Returns whether child
     * geometry was restored.
     */
    pub fn apply<H: DockHost + ?Sized>(
        &self,
        layout: &DockLayout,
        host: &mut H,
    ) -> PlatformResult<bool> {
        let placement: WindowPlacement = self.window_state.parse()?;
        host.set_window_placement(&placement)?;

        if self.controls.len() != layout.len() {
            log::debug!(
                "[LayoutState] Saved state has {} controls but layout has {}; restoring window placement only.",
                self.controls.len(),
                layout.len()
            );
            return Ok(false);
        }

        for (binding, saved) in layout.bindings().iter().zip(&self.controls) {
            match host.child_mut(binding.control_id) {
                Some(child) => {
                    child.set_position(saved.x, saved.y);
                    child.set_size(saved.width, saved.height);
                }
                None => log::warn!(
                    "[LayoutState] Control {} is not registered; skipping restore.",
                    binding.control_id.raw()
                ),
            }
        }
        Ok(true)
    }
}

pub fn save_state<H, W>(layout: &DockLayout, host: &H, mut writer: W) -> PlatformResult<()>
where
    H: DockHost + ?Sized,
    W: Write,
{
    let state = LayoutState::capture(layout, host)?;
    serde_json::to_writer(&mut writer, &state)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Returns whether child geometry was restored; window placement is always applied.
pub fn load_state<H, R>(layout: &DockLayout, host: &mut H, reader: R) -> PlatformResult<bool>
where
    H: DockHost + ?Sized,
    R: Read,
{
    // Only the first document is read; anything after it is ignored.
    let state = serde_json::Deserializer::from_reader(reader)
        .into_iter::<LayoutState>()
        .next()
        .ok_or_else(|| PlatformError::Decode("empty layout state document".to_string()))??;
    state.apply(layout, host)
}

pub fn save_state_file<H: DockHost + ?Sized>(
    layout: &DockLayout,
    host: &H,
    path: impl AsRef<Path>,
) -> PlatformResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    save_state(layout, host, BufWriter::new(file))?;
    log::debug!("[LayoutState] Saved layout state to {}", path.display());
    Ok(())
}

/*
 * Loads state from `path`. A missing file means there is no saved state yet
 * and returns `Ok(false)` without touching the host; any other I/O error is
 * returned. Otherwise returns the result of `load_state`.
 */
pub fn load_state_file<H: DockHost + ?Sized>(
    layout: &DockLayout,
    host: &mut H,
    path: impl AsRef<Path>,
) -> PlatformResult<bool> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            log::debug!("[LayoutState] No saved state at {}", path.display());
            return Ok(false);
        }
        Err(err) => return Err(err.into()),
    };
    load_state(layout, host, BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dockable::Dockable;
    use crate::headless::{HeadlessControl, HeadlessHost};
    use crate::types::{ControlId, Direction, Point, Rect};

    fn sample_placement() -> WindowPlacement {
        WindowPlacement {
            flags: 0,
            show_cmd: 1,
            min_position: Point::new(-1, -1),
            max_position: Point::new(-1, -1),
            normal_position: Rect::new(120, 80, 820, 680),
        }
    }

    fn docked_host() -> (HeadlessHost, DockLayout, ControlId, ControlId) {
        let mut host = HeadlessHost::new(400, 300);
        host.set_placement(Some(sample_placement()));
        let top = host.add_control(HeadlessControl::new(10, 40));
        let fill = host.add_control(HeadlessControl::new(10, 10));
        let mut layout = DockLayout::new();
        layout.dock(top, Direction::Top);
        layout.dock(fill, Direction::Fill);
        layout.update(&mut host);
        (host, layout, top, fill)
    }

    #[test]
    fn save_writes_expected_document() {
        // Arrange
        let (host, layout, _, _) = docked_host();
        let mut buf = Vec::new();
        // Act
        save_state(&layout, &host, &mut buf).unwrap();
        // Assert
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "{\"WindowState\":\"0 1 -1 -1 -1 -1 120 80 820 680\",\"Controls\":[\
             {\"X\":0,\"Y\":0,\"Width\":400,\"Height\":40},\
             {\"X\":0,\"Y\":40,\"Width\":400,\"Height\":260}]}\n"
        );
    }

    #[test]
    fn save_then_load_restores_geometry_and_placement() {
        let (mut host, layout, top, fill) = docked_host();
        let mut buf = Vec::new();
        save_state(&layout, &host, &mut buf).unwrap();

        host.set_placement(Some(WindowPlacement::default()));
        host.control_mut(top).unwrap().set_position(5, 5);
        host.control_mut(fill).unwrap().set_size(1, 1);

        let restored = load_state(&layout, &mut host, buf.as_slice()).unwrap();

        assert!(restored);
        assert_eq!(host.placement(), Some(sample_placement()));
        assert_eq!(host.control(top).unwrap().bounds(), Rect::from_xywh(0, 0, 400, 40));
        assert_eq!(host.control(fill).unwrap().bounds(), Rect::from_xywh(0, 40, 400, 260));
    }

    #[test]
    fn count_mismatch_restores_placement_only() {
        let (mut host, layout, top, fill) = docked_host();
        let doc = r#"{"WindowState":"2 3 0 0 0 0 1 2 3 4","Controls":[{"X":9,"Y":9,"Width":9,"Height":9}]}"#;
        let before_top = host.control(top).unwrap().bounds();
        let before_fill = host.control(fill).unwrap().bounds();

        let restored = load_state(&layout, &mut host, doc.as_bytes()).unwrap();

        assert!(!restored);
        let placement = host.placement().unwrap();
        assert_eq!(placement.flags, 2);
        assert_eq!(placement.show_cmd, 3);
        assert_eq!(placement.normal_position, Rect::new(1, 2, 3, 4));
        assert_eq!(host.control(top).unwrap().bounds(), before_top);
        assert_eq!(host.control(fill).unwrap().bounds(), before_fill);
    }

    #[test]
    fn null_controls_decode_as_empty() {
        let state: LayoutState =
            serde_json::from_str(r#"{"WindowState":"0 1 0 0 0 0 0 0 10 10","Controls":null}"#)
                .unwrap();
        assert!(state.controls.is_empty());
    }

    #[test]
    fn malformed_documents_fail_to_decode() {
        let (mut host, layout, _, _) = docked_host();

        let err = load_state(&layout, &mut host, "{\"WindowState\":".as_bytes()).unwrap_err();
        assert!(matches!(err, PlatformError::Decode(_)));

        let err = load_state(
            &layout,
            &mut host,
            r#"{"WindowState":"1 2 3","Controls":[]}"#.as_bytes(),
        )
        .unwrap_err();
        assert!(matches!(err, PlatformError::Decode(_)));
        // The placement was never applied.
        assert_eq!(host.placement(), Some(sample_placement()));
    }

    #[test]
    fn content_after_the_document_is_ignored() {
        let (mut host, layout, _, _) = docked_host();
        let doc = "{\"WindowState\":\"0 7 0 0 0 0 0 0 10 10\",\"Controls\":[]}\ntrailing garbage";

        let restored = load_state(&layout, &mut host, doc.as_bytes()).unwrap();

        assert!(!restored);
        assert_eq!(host.placement().unwrap().show_cmd, 7);
    }

    #[test]
    fn empty_input_fails_to_decode() {
        let (mut host, layout, _, _) = docked_host();

        let err = load_state(&layout, &mut host, "".as_bytes()).unwrap_err();

        assert!(matches!(err, PlatformError::Decode(_)));
    }

    #[test]
    fn save_fails_when_placement_is_unavailable() {
        let (mut host, layout, _, _) = docked_host();
        host.set_placement(None);
        let mut buf = Vec::new();

        let err = save_state(&layout, &host, &mut buf).unwrap_err();

        assert!(matches!(err, PlatformError::OperationFailed(_)));
        assert!(buf.is_empty());
    }

    #[test]
    fn missing_file_is_a_silent_no_op() {
        let (mut host, layout, top, _) = docked_host();
        let dir = tempfile::tempdir().unwrap();
        let before = host.control(top).unwrap().bounds();

        let restored = load_state_file(&layout, &mut host, dir.path().join("layout.json")).unwrap();

        assert!(!restored);
        assert_eq!(host.control(top).unwrap().bounds(), before);
        assert_eq!(host.placement(), Some(sample_placement()));
    }

    #[test]
    fn other_open_errors_are_reported() {
        let (mut host, layout, _, _) = docked_host();
        let dir = tempfile::tempdir().unwrap();

        // A directory is not a state file; the failure is not NotFound.
        let result = load_state_file(&layout, &mut host, dir.path());

        assert!(result.is_err());
    }

    #[test]
    fn file_round_trip() {
        let (mut host, layout, top, _) = docked_host();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        save_state_file(&layout, &host, &path).unwrap();

        host.control_mut(top).unwrap().set_size(3, 3);
        let restored = load_state_file(&layout, &mut host, &path).unwrap();

        assert!(restored);
        assert_eq!(host.control(top).unwrap().size().height, 40);
    }
}
