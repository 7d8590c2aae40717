use super::*;

use tokio::sync::mpsc;

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().expect("buf").clone()).expect("utf8")
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().expect("buf").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn surface() -> (
    TerminalSurface<SharedBuf>,
    SharedBuf,
    mpsc::UnboundedSender<String>,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let buf = SharedBuf::default();
    let surface = TerminalSurface::new(buf.clone(), Arc::new(AsyncMutex::new(rx)));
    (surface, buf, tx)
}

#[test]
fn status_lists_visible_panels_and_numbered_companies() {
    let (surface, _buf, _tx) = surface();
    surface.set_company_options(&["Acme Corp".to_string(), "Globex".to_string()]);
    surface.show(Panel::CompanyList.into());
    surface.show(Panel::Step2b.into());

    let status = surface.render_status();

    assert!(status.starts_with("visible: company list, investigation"));
    assert!(status.contains("  [0] Acme Corp"));
    assert!(status.contains("  [1] Globex"));
}

#[test]
fn repeated_show_and_hide_print_once() {
    let (surface, buf, _tx) = surface();
    surface.show(Panel::Results.into());
    surface.show(Panel::Results.into());
    surface.hide(Panel::Results.into());
    surface.hide(Panel::Results.into());

    assert_eq!(buf.contents(), "[+] results\n[-] results\n");
}

#[test]
fn disabled_control_reports_busy() {
    let (surface, _buf, _tx) = surface();
    surface.set_label(Control::FindCompanies, "Finding...");
    surface.set_enabled(Control::FindCompanies, false);

    assert!(!surface.is_enabled(Control::FindCompanies));
    assert!(surface.render_status().contains("Finding... (busy)"));

    surface.set_enabled(Control::FindCompanies, true);
    assert!(surface.is_enabled(Control::FindCompanies));
}

#[tokio::test]
async fn confirm_reads_next_line() {
    let (surface, buf, tx) = surface();

    tx.send(" Yes ".to_string()).expect("send");
    assert!(surface.confirm("Reset?").await);

    tx.send("n".to_string()).expect("send");
    assert!(!surface.confirm("Reset?").await);

    assert!(buf.contents().contains("Reset? [y/N]"));
}

#[tokio::test]
async fn confirm_declines_when_input_closed() {
    let (surface, _buf, tx) = surface();
    drop(tx);

    assert!(!surface.confirm("Reset?").await);
}
